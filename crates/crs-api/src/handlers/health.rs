//! Health endpoint.

use axum::Json;

use crate::dto::response::MessageResponse;

/// GET /api/health
pub async fn health() -> Json<MessageResponse> {
    Json(MessageResponse::new("ok"))
}
