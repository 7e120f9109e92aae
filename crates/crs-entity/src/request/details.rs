//! Common free-text details carried by every request.

use serde::{Deserialize, Serialize};

/// Reference to an uploaded supporting document.
///
/// The file content itself lives with the upload collaborator; the request
/// only records where it is and what it claims to be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofAttachment {
    /// Original file name.
    pub filename: String,
    /// Declared MIME type.
    pub content_type: String,
    /// Location of the stored file.
    pub url: String,
}

/// Free-text justification with optional proof attachments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDetails {
    /// A brief explanation of the request.
    pub reason: String,
    /// Optional supporting documents.
    #[serde(default)]
    pub proof: Vec<ProofAttachment>,
}
