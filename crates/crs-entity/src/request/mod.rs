//! Request entities: the tagged request union, details, and responses.

pub mod details;
pub mod kind;
pub mod model;
pub mod payload;
pub mod response;

pub use details::{ProofAttachment, RequestDetails};
pub use kind::RequestKind;
pub use model::{CourseRequest, RequestInit};
pub use payload::RequestPayload;
pub use response::{Decision, RequestResponse, ResponseInit};
