//! # crs-core
//!
//! Core crate for CRS, the course request system. Contains the domain
//! error taxonomy, the shared result alias, and the configuration schemas.
//!
//! This crate has **no** internal dependencies on other CRS crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::{DomainError, ErrorKind};
pub use result::DomainResult;
