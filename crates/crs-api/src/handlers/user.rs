//! User and enrollment handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use validator::Validate;

use crs_core::error::DomainError;
use crs_entity::course::{Class, CourseId};
use crs_entity::user::User;

use crate::dto::request::{EnrollmentChangeRequest, RoleQuery};
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/users/sync
pub async fn sync(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MessageResponse>, ApiError> {
    state.user_service.sync(&auth).await?;
    Ok(Json(MessageResponse::new("User synchronized")))
}

/// GET /api/users/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<User>, ApiError> {
    let user = state.user_service.get_current_user(&auth).await?;
    Ok(Json(user))
}

/// GET /api/courses/{code}/{term}/users
pub async fn course_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((code, term)): Path<(String, String)>,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = state
        .user_service
        .get_users_from_course(&auth, &CourseId { code, term })
        .await?;
    Ok(Json(users))
}

/// GET /api/courses/{code}/{term}/classes/{section}/users?role=
pub async fn class_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((code, term, section)): Path<(String, String, String)>,
    Query(query): Query<RoleQuery>,
) -> Result<Json<Vec<User>>, ApiError> {
    let class = Class {
        course: CourseId { code, term },
        section,
    };
    let users = state
        .user_service
        .get_users_from_class(&auth, &class, query.role)
        .await?;
    Ok(Json(users))
}

/// POST /api/enrollments
pub async fn create_enrollment(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<EnrollmentChangeRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    req.validate()
        .map_err(|e| DomainError::validation(e.to_string()))?;
    state
        .user_service
        .create_enrollment_for_user(&auth, &req.user, &req.enrollment)
        .await?;
    Ok(Json(MessageResponse::new("Enrollment created")))
}

/// DELETE /api/enrollments
pub async fn delete_enrollment(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<EnrollmentChangeRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    req.validate()
        .map_err(|e| DomainError::validation(e.to_string()))?;
    state
        .user_service
        .delete_enrollment_for_user(&auth, &req.user, &req.enrollment)
        .await?;
    Ok(Json(MessageResponse::new("Enrollment deleted")))
}
