//! # crs-service
//!
//! The permission-checked domain service layer of CRS. Every operation
//! takes the acting user's verified identity as an explicit parameter,
//! loads the acting user's record, evaluates the authorization guards
//! against the target resource, performs the store mutation or query, and
//! returns a validated result or a typed domain error.

pub mod access;
pub mod context;
pub mod course;
pub mod notify;
pub mod request;
pub mod user;

pub use context::ActingUser;
pub use course::CourseService;
pub use notify::NotificationService;
pub use request::RequestService;
pub use user::UserService;
