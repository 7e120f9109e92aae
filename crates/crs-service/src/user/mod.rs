//! User operations: login sync, roster queries, enrollment management.

pub mod service;

pub use service::UserService;
