//! Application state shared across all handlers.

use std::sync::Arc;

use crs_core::config::AppConfig;
use crs_service::course::CourseService;
use crs_service::request::RequestService;
use crs_service::user::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// User service.
    pub user_service: Arc<UserService>,
    /// Course service.
    pub course_service: Arc<CourseService>,
    /// Request service.
    pub request_service: Arc<RequestService>,
}
