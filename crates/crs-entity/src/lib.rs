//! # crs-entity
//!
//! Domain entities for CRS: users with their enrollment records, course
//! offerings with sections and assignments, and the request/response
//! lifecycle records.

pub mod course;
pub mod request;
pub mod user;

pub use course::{Assignment, Class, Course, CourseId, Meeting, Section};
pub use request::{
    CourseRequest, Decision, ProofAttachment, RequestDetails, RequestInit, RequestKind,
    RequestPayload, RequestResponse, ResponseInit,
};
pub use user::{Enrollment, Role, User};
