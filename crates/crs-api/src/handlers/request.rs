//! Request lifecycle handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use crs_core::error::DomainError;
use crs_entity::request::{CourseRequest, RequestDetails, RequestInit, ResponseInit};

use crate::dto::request::{CreateRequestRequest, CreateResponseRequest};
use crate::dto::response::{CreatedResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/requests
pub async fn create_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateRequestRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    req.validate()
        .map_err(|e| DomainError::validation(e.to_string()))?;

    let init = RequestInit {
        class: req.class,
        details: RequestDetails {
            reason: req.reason,
            proof: req.proof,
        },
        payload: req.payload,
    };
    let id = state.request_service.create_request(&auth, init).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// GET /api/requests
pub async fn list_requests(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<CourseRequest>>, ApiError> {
    let requests = state.request_service.get_requests(&auth).await?;
    Ok(Json(requests))
}

/// GET /api/requests/{id}
pub async fn get_request(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CourseRequest>, ApiError> {
    let request = state.request_service.get_request(id).await?;
    Ok(Json(request))
}

/// POST /api/requests/{id}/response
pub async fn create_response(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateResponseRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .request_service
        .create_response(
            &auth,
            id,
            ResponseInit {
                decision: req.decision,
                remarks: req.remarks,
            },
        )
        .await?;
    Ok(Json(MessageResponse::new("Response created")))
}
