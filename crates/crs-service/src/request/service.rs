//! Request service — creation, listing, and one-shot responses.
//!
//! A request moves through a one-way, one-shot state machine:
//! unanswered → answered. Attaching the response is conditioned at the
//! store level on the response still being absent, so two concurrent
//! response attempts cannot both succeed.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crs_core::error::DomainError;
use crs_core::result::DomainResult;
use crs_database::store::{CourseStore, RequestStore, UserStore};
use crs_entity::course::Course;
use crs_entity::request::{
    CourseRequest, RequestInit, RequestPayload, RequestResponse, ResponseInit,
};
use crs_entity::user::{Role, User};

use crate::access::guards::assert_class_role;
use crate::context::ActingUser;
use crate::notify::NotificationService;

/// Handles student requests and instructor responses.
pub struct RequestService {
    /// User store.
    users: Arc<dyn UserStore>,
    /// Course store.
    courses: Arc<dyn CourseStore>,
    /// Request store.
    requests: Arc<dyn RequestStore>,
    /// Notification dispatch for request/response events.
    notifications: Arc<NotificationService>,
}

impl RequestService {
    /// Creates a new request service.
    pub fn new(
        users: Arc<dyn UserStore>,
        courses: Arc<dyn CourseStore>,
        requests: Arc<dyn RequestStore>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            users,
            courses,
            requests,
            notifications,
        }
    }

    async fn require_user(&self, email: &str) -> DomainResult<User> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or_else(|| DomainError::user_not_found(email))
    }

    /// File a new request as the acting user.
    ///
    /// The target course and section must exist, the request kind must be
    /// accepted by the course, and the acting user must hold the student
    /// role in the exact target class. Returns the fresh request identity.
    pub async fn create_request(
        &self,
        acting: &ActingUser,
        init: RequestInit,
    ) -> DomainResult<Uuid> {
        let user = self.require_user(&acting.email).await?;

        let course_id = &init.class.course;
        let course = self
            .courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| DomainError::course_not_found(&course_id.code, &course_id.term))?;

        if !course.has_section(&init.class.section) {
            return Err(DomainError::section_not_found(
                &course_id.code,
                &course_id.term,
                &init.class.section,
            ));
        }

        let kind = init.payload.kind();
        if !course.accepts(kind) {
            return Err(DomainError::validation(format!(
                "Request type {kind} is not accepted for course {}",
                course.id()
            )));
        }

        // Not-enrolled-at-all is reported distinctly from wrong-role.
        if !user.is_enrolled_in_class(&init.class) {
            return Err(DomainError::NotEnrolled {
                email: user.email.clone(),
                class: init.class.to_string(),
            });
        }
        assert_class_role(&user, &init.class, &[Role::Student], "creating a request")?;

        validate_payload(&course, &init.payload)?;

        let request = CourseRequest {
            id: Uuid::new_v4(),
            from: acting.email.clone(),
            class: init.class,
            details: init.details,
            payload: init.payload,
            created_at: Utc::now(),
            response: None,
        };
        self.requests.insert(&request).await?;

        info!(
            request_id = %request.id,
            from = %request.from,
            class = %request.class,
            kind = %request.kind(),
            "Request created"
        );
        let id = request.id;
        self.notifications.spawn_request_created(request);
        Ok(id)
    }

    /// Fetch a request by identity.
    pub async fn get_request(&self, id: Uuid) -> DomainResult<CourseRequest> {
        self.requests
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::request_not_found(id))
    }

    /// All requests of the acting user, newest first.
    ///
    /// A request is *of* a user iff the user is the requester, or the user
    /// is an instructor of the class the request targets. A request
    /// satisfying both appears once.
    pub async fn get_requests(&self, acting: &ActingUser) -> DomainResult<Vec<CourseRequest>> {
        let user = self.require_user(&acting.email).await?;
        let instructor_classes = user.classes_with_role(Role::Instructor);
        self.requests
            .find_for_user(&user.email, &instructor_classes)
            .await
    }

    /// Attach the one-shot response to a request as the acting user.
    ///
    /// Fails when the request is unknown or already answered; requires the
    /// instructor role in the request's class. The store-level conditional
    /// update guarantees the original response is never overwritten, even
    /// under concurrent attempts.
    pub async fn create_response(
        &self,
        acting: &ActingUser,
        request_id: Uuid,
        init: ResponseInit,
    ) -> DomainResult<()> {
        let user = self.require_user(&acting.email).await?;

        let mut request = self.get_request(request_id).await?;
        if request.is_answered() {
            return Err(DomainError::ResponseAlreadyExists { id: request_id });
        }

        assert_class_role(
            &user,
            &request.class,
            &[Role::Instructor],
            &format!("creating a response for request {request_id}"),
        )?;

        let response = RequestResponse {
            from: acting.email.clone(),
            decision: init.decision,
            remarks: init.remarks,
            timestamp: Utc::now(),
        };
        let applied = self
            .requests
            .set_response_if_absent(request_id, &response)
            .await?;
        if !applied {
            // Lost the race against a concurrent responder.
            return Err(DomainError::ResponseAlreadyExists { id: request_id });
        }

        info!(
            request_id = %request_id,
            from = %acting.email,
            decision = %response.decision,
            "Response created"
        );
        request.response = Some(response);
        self.notifications.spawn_response_created(request);
        Ok(())
    }
}

/// Kind-specific validation of request metadata against the course.
fn validate_payload(course: &Course, payload: &RequestPayload) -> DomainResult<()> {
    match payload {
        RequestPayload::SwapSection {
            from_section,
            to_section,
            ..
        } => {
            for section in [from_section, to_section] {
                if !course.has_section(section) {
                    return Err(DomainError::section_not_found(
                        &course.code,
                        &course.term,
                        section,
                    ));
                }
            }
            Ok(())
        }
        RequestPayload::DeadlineExtension {
            assignment,
            deadline,
        } => {
            let assignment_def = course.assignments.get(assignment).ok_or_else(|| {
                DomainError::validation(format!(
                    "Assignment {assignment} not found in course {}",
                    course.id()
                ))
            })?;
            if *deadline <= assignment_def.due {
                return Err(DomainError::validation(format!(
                    "Requested deadline must be after the current due date {}",
                    assignment_def.due
                )));
            }
            if *deadline > assignment_def.latest_extended_due() {
                return Err(DomainError::validation(format!(
                    "Requested deadline exceeds the maximum extension for {assignment} \
                     (latest allowed: {})",
                    assignment_def.latest_extended_due()
                )));
            }
            Ok(())
        }
    }
}
