//! Kind-specific request payloads.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::kind::RequestKind;

/// Kind-specific metadata of a request, as a tagged union.
///
/// The tag mirrors [`RequestKind`]'s display names so a serialized request
/// carries a single discriminating `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RequestPayload {
    /// Swap from one section of the course to another.
    #[serde(rename = "Swap Section")]
    SwapSection {
        /// The section code to swap from.
        from_section: String,
        /// The date of the meeting to swap from.
        from_date: NaiveDate,
        /// The desired section code to swap to.
        to_section: String,
        /// The date of the meeting to swap to.
        to_date: NaiveDate,
    },
    /// Extend an assignment deadline.
    #[serde(rename = "Deadline Extension")]
    DeadlineExtension {
        /// Code of the assignment to extend.
        assignment: String,
        /// The requested new deadline.
        deadline: DateTime<Utc>,
    },
}

impl RequestPayload {
    /// The kind this payload belongs to.
    pub fn kind(&self) -> RequestKind {
        match self {
            Self::SwapSection { .. } => RequestKind::SwapSection,
            Self::DeadlineExtension { .. } => RequestKind::DeadlineExtension,
        }
    }
}
