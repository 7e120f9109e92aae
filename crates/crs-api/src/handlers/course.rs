//! Course handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crs_entity::course::{Course, CourseId};
use crs_entity::request::CourseRequest;

use crate::dto::request::{
    UpdateAssignmentsRequest, UpdateRequestTypesRequest, UpdateSectionsRequest,
};
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/courses
///
/// Administrative: course creation is performed out-of-band and carries no
/// role guard, but still requires an authenticated caller.
pub async fn create_course(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(course): Json<Course>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    state.course_service.create_course(&course).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Course created")),
    ))
}

/// GET /api/courses
pub async fn list_courses(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Course>>, ApiError> {
    let courses = state
        .course_service
        .get_courses_from_enrollment(&auth)
        .await?;
    Ok(Json(courses))
}

/// GET /api/courses/{code}/{term}
pub async fn get_course(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((code, term)): Path<(String, String)>,
) -> Result<Json<Course>, ApiError> {
    let course = state
        .course_service
        .get_course(&auth, &CourseId { code, term })
        .await?;
    Ok(Json(course))
}

/// PUT /api/courses/{code}/{term}/sections
pub async fn update_sections(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((code, term)): Path<(String, String)>,
    Json(req): Json<UpdateSectionsRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .course_service
        .update_sections(&auth, &CourseId { code, term }, req.sections)
        .await?;
    Ok(Json(MessageResponse::new("Sections updated")))
}

/// PUT /api/courses/{code}/{term}/assignments
pub async fn update_assignments(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((code, term)): Path<(String, String)>,
    Json(req): Json<UpdateAssignmentsRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .course_service
        .update_assignments(&auth, &CourseId { code, term }, req.assignments)
        .await?;
    Ok(Json(MessageResponse::new("Assignments updated")))
}

/// PUT /api/courses/{code}/{term}/request-types
pub async fn update_request_types(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((code, term)): Path<(String, String)>,
    Json(req): Json<UpdateRequestTypesRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .course_service
        .set_effective_request_types(&auth, &CourseId { code, term }, req.effective_request_types)
        .await?;
    Ok(Json(MessageResponse::new("Effective request types updated")))
}

/// GET /api/courses/{code}/{term}/requests
pub async fn course_requests(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((code, term)): Path<(String, String)>,
) -> Result<Json<Vec<CourseRequest>>, ApiError> {
    let requests = state
        .course_service
        .get_course_requests(&auth, &CourseId { code, term })
        .await?;
    Ok(Json(requests))
}
