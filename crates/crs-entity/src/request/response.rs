//! Instructor responses to requests.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An instructor's decision on a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// The request is granted.
    Approve,
    /// The request is denied.
    Reject,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Approve => write!(f, "Approve"),
            Self::Reject => write!(f, "Reject"),
        }
    }
}

/// A response attached to exactly one request.
///
/// Created only via the request service's response operation, and never
/// edited or deleted afterwards: a request transitions from unanswered to
/// answered exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestResponse {
    /// Email of the responding instructor.
    pub from: String,
    /// The decision.
    pub decision: Decision,
    /// Free-text remarks accompanying the decision.
    pub remarks: String,
    /// When the response was created.
    pub timestamp: DateTime<Utc>,
}

/// Caller-supplied fields of a response; responder identity and timestamp
/// are assigned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseInit {
    /// The decision.
    pub decision: Decision,
    /// Free-text remarks accompanying the decision.
    pub remarks: String,
}
