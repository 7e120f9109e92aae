//! Route definitions for the CRS HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The router
//! receives `AppState` and passes it to all handlers via axum's `State`
//! extractor.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(user_routes())
        .merge(course_routes())
        .merge(request_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// User sync, profile, rosters, and enrollment management.
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/sync", post(handlers::user::sync))
        .route("/users/me", get(handlers::user::me))
        .route(
            "/courses/{code}/{term}/users",
            get(handlers::user::course_users),
        )
        .route(
            "/courses/{code}/{term}/classes/{section}/users",
            get(handlers::user::class_users),
        )
        .route("/enrollments", post(handlers::user::create_enrollment))
        .route("/enrollments", delete(handlers::user::delete_enrollment))
}

/// Course creation, lookup, and instructor-side mutation.
fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/courses", post(handlers::course::create_course))
        .route("/courses", get(handlers::course::list_courses))
        .route("/courses/{code}/{term}", get(handlers::course::get_course))
        .route(
            "/courses/{code}/{term}/sections",
            put(handlers::course::update_sections),
        )
        .route(
            "/courses/{code}/{term}/assignments",
            put(handlers::course::update_assignments),
        )
        .route(
            "/courses/{code}/{term}/request-types",
            put(handlers::course::update_request_types),
        )
        .route(
            "/courses/{code}/{term}/requests",
            get(handlers::course::course_requests),
        )
}

/// Request creation, listing, and responses.
fn request_routes() -> Router<AppState> {
    Router::new()
        .route("/requests", post(handlers::request::create_request))
        .route("/requests", get(handlers::request::list_requests))
        .route("/requests/{id}", get(handlers::request::get_request))
        .route(
            "/requests/{id}/response",
            post(handlers::request::create_response),
        )
}

/// Health probe.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
