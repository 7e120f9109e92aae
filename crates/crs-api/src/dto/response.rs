//! Response body shapes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Simple acknowledgement body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

impl MessageResponse {
    /// Create an acknowledgement.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body returned when a new resource was created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    /// Identity of the created resource.
    pub id: Uuid,
}
