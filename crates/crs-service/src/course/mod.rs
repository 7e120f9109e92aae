//! Course operations: creation, lookup, and instructor-side mutation.

pub mod service;

pub use service::CourseService;
