//! The request root entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::course::Class;

use super::details::RequestDetails;
use super::kind::RequestKind;
use super::payload::RequestPayload;
use super::response::RequestResponse;

/// A student request against a class, with its optional response.
///
/// References the requester and the course by identity (weak references,
/// resolved by lookup); deleting a user or course does not cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRequest {
    /// Unique request identity.
    pub id: Uuid,
    /// Email of the requesting student.
    pub from: String,
    /// The class the request targets.
    pub class: Class,
    /// Free-text justification and attachments.
    pub details: RequestDetails,
    /// Kind-specific metadata.
    pub payload: RequestPayload,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
    /// The response, once answered. `None` while unanswered; set at most
    /// once and immutable afterwards.
    pub response: Option<RequestResponse>,
}

impl CourseRequest {
    /// The kind of this request.
    pub fn kind(&self) -> RequestKind {
        self.payload.kind()
    }

    /// Whether the request has been answered.
    pub fn is_answered(&self) -> bool {
        self.response.is_some()
    }
}

/// Caller-supplied fields of a new request; identity, requester, creation
/// timestamp, and the empty response slot are assigned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestInit {
    /// The class the request targets.
    pub class: Class,
    /// Free-text justification and attachments.
    pub details: RequestDetails,
    /// Kind-specific metadata.
    pub payload: RequestPayload,
}
