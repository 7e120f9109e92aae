//! Notification dispatch for request and response events.
//!
//! Dispatch is fire-and-forget from the core's perspective: the triggering
//! mutation has already committed by the time a notification is attempted,
//! and a dispatch failure is logged and swallowed, never surfaced to the
//! caller of the triggering operation.

use std::sync::Arc;

use tracing::warn;

use crs_core::error::DomainError;
use crs_core::result::DomainResult;
use crs_database::store::UserStore;
use crs_entity::request::CourseRequest;
use crs_entity::user::Role;

use super::mailer::Mailer;

/// Emails the people involved in a request's lifecycle.
pub struct NotificationService {
    /// User store, for resolving recipients from enrollment.
    users: Arc<dyn UserStore>,
    /// The SMTP mailer (possibly suppressed).
    mailer: Mailer,
    /// Public base URL for request/response links.
    base_url: String,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(users: Arc<dyn UserStore>, mailer: Mailer, base_url: impl Into<String>) -> Self {
        Self {
            users,
            mailer,
            base_url: base_url.into(),
        }
    }

    fn request_link(&self, request: &CourseRequest) -> String {
        format!("{}/request/{}", self.base_url, request.id)
    }

    fn response_link(&self, request: &CourseRequest) -> String {
        format!("{}/response/{}", self.base_url, request.id)
    }

    /// Notify in the background, logging and swallowing any failure.
    pub fn spawn_request_created(self: &Arc<Self>, request: CourseRequest) {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = this.request_created(&request).await {
                warn!(request_id = %request.id, error = %e, "Failed to send new-request notification");
            }
        });
    }

    /// Notify in the background, logging and swallowing any failure.
    pub fn spawn_response_created(self: &Arc<Self>, request: CourseRequest) {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = this.response_created(&request).await {
                warn!(request_id = %request.id, error = %e, "Failed to send new-response notification");
            }
        });
    }

    /// Notify the responsible instructors, and the requester, of a new
    /// request.
    pub async fn request_created(&self, request: &CourseRequest) -> DomainResult<()> {
        let instructors = self
            .users
            .find_by_class_role(&request.class, Role::Instructor)
            .await?;
        let student = self
            .users
            .find_by_email(&request.from)
            .await?
            .ok_or_else(|| DomainError::user_not_found(&request.from))?;

        let instructor_names = instructors
            .iter()
            .map(|i| i.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let to: Vec<String> = instructors.into_iter().map(|i| i.email).collect();
        let cc = vec![student.email.clone()];

        let html = format!(
            "<p>Dear {instructor_names},</p>\
             <p>{} has filed a new {} request for {}.</p>\
             <p><a href=\"{}\">View the request</a> or \
             <a href=\"{}\">respond to it</a>.</p>",
            student.name,
            request.kind(),
            request.class,
            self.request_link(request),
            self.response_link(request),
        );

        self.mailer.send(&to, &cc, "New Request", html).await
    }

    /// Notify the requester, and the responsible instructors and TAs, of a
    /// new response.
    pub async fn response_created(&self, request: &CourseRequest) -> DomainResult<()> {
        let response = request.response.as_ref().ok_or_else(|| {
            DomainError::Notification(format!(
                "Request {} does not have a response yet",
                request.id
            ))
        })?;

        let student = self
            .users
            .find_by_email(&request.from)
            .await?
            .ok_or_else(|| DomainError::user_not_found(&request.from))?;
        let instructor = self
            .users
            .find_by_email(&response.from)
            .await?
            .ok_or_else(|| DomainError::user_not_found(&response.from))?;
        let instructors = self
            .users
            .find_by_class_role(&request.class, Role::Instructor)
            .await?;
        let tas = self.users.find_by_class_role(&request.class, Role::Ta).await?;

        let to = vec![student.email.clone()];
        let cc: Vec<String> = instructors
            .into_iter()
            .chain(tas)
            .map(|u| u.email)
            .collect();

        let html = format!(
            "<p>Dear {},</p>\
             <p>{} has responded to your {} request for {}: <b>{}</b>.</p>\
             <p>Remarks: {}</p>\
             <p><a href=\"{}\">View the response</a>.</p>",
            student.name,
            instructor.name,
            request.kind(),
            request.class,
            response.decision,
            response.remarks,
            self.response_link(request),
        );

        self.mailer.send(&to, &cc, "New Response", html).await
    }
}
