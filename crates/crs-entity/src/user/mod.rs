//! User entity and role model.

pub mod model;
pub mod role;

pub use model::{Enrollment, User};
pub use role::Role;
