//! Course service — creation, lookup, and instructor-side mutation.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::info;

use crs_core::error::DomainError;
use crs_core::result::DomainResult;
use crs_database::store::{CourseStore, RequestStore, UserStore};
use crs_entity::course::{Assignment, Course, CourseId, Section};
use crs_entity::request::{CourseRequest, RequestKind};
use crs_entity::user::{Role, User};

use crate::access::guards::assert_course_role;
use crate::context::ActingUser;

/// Handles course offerings.
pub struct CourseService {
    /// User store, for resolving the acting user's enrollment.
    users: Arc<dyn UserStore>,
    /// Course store.
    courses: Arc<dyn CourseStore>,
    /// Request store, for the instructor-side course request listing.
    requests: Arc<dyn RequestStore>,
}

impl CourseService {
    /// Creates a new course service.
    pub fn new(
        users: Arc<dyn UserStore>,
        courses: Arc<dyn CourseStore>,
        requests: Arc<dyn RequestStore>,
    ) -> Self {
        Self {
            users,
            courses,
            requests,
        }
    }

    async fn require_user(&self, email: &str) -> DomainResult<User> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or_else(|| DomainError::user_not_found(email))
    }

    /// Require the acting user to hold the instructor role in the course.
    async fn require_instructor(
        &self,
        acting: &ActingUser,
        course: &CourseId,
        operation: &str,
    ) -> DomainResult<User> {
        let user = self.require_user(&acting.email).await?;
        assert_course_role(&user, course, &[Role::Instructor], operation)?;
        Ok(user)
    }

    /// Create a course offering. Administrative: performed out-of-band,
    /// with no role guard; fails when the (code, term) pair already exists.
    pub async fn create_course(&self, course: &Course) -> DomainResult<()> {
        self.courses.insert(course).await?;
        info!(course = %course.id(), "Course created");
        Ok(())
    }

    /// Fetch a course. Requires the acting user to hold any role in it.
    pub async fn get_course(&self, acting: &ActingUser, id: &CourseId) -> DomainResult<Course> {
        let user = self.require_user(&acting.email).await?;
        assert_course_role(&user, id, &Role::ALL, &format!("viewing course {id}"))?;
        self.courses
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::course_not_found(&id.code, &id.term))
    }

    /// Every course referenced by the acting user's own enrollment list.
    /// No role restriction — a user always sees their own courses; courses
    /// referenced but since deleted are silently skipped.
    pub async fn get_courses_from_enrollment(
        &self,
        acting: &ActingUser,
    ) -> DomainResult<Vec<Course>> {
        let user = self.require_user(&acting.email).await?;
        self.courses.find_by_ids(&user.enrolled_courses()).await
    }

    /// Overwrite the course's sections map wholesale. Instructors only.
    pub async fn update_sections(
        &self,
        acting: &ActingUser,
        id: &CourseId,
        sections: BTreeMap<String, Section>,
    ) -> DomainResult<()> {
        self.require_instructor(acting, id, &format!("updating sections of course {id}"))
            .await?;
        self.courses.update_sections(id, &sections).await?;
        info!(course = %id, "Sections updated");
        Ok(())
    }

    /// Overwrite the course's assignments map wholesale. Instructors only.
    pub async fn update_assignments(
        &self,
        acting: &ActingUser,
        id: &CourseId,
        assignments: BTreeMap<String, Assignment>,
    ) -> DomainResult<()> {
        self.require_instructor(acting, id, &format!("updating assignments of course {id}"))
            .await?;
        self.courses.update_assignments(id, &assignments).await?;
        info!(course = %id, "Assignments updated");
        Ok(())
    }

    /// Overwrite which request kinds students may currently file, wholesale.
    /// Instructors only.
    pub async fn set_effective_request_types(
        &self,
        acting: &ActingUser,
        id: &CourseId,
        types: BTreeMap<RequestKind, bool>,
    ) -> DomainResult<()> {
        self.require_instructor(
            acting,
            id,
            &format!("updating effective request types of course {id}"),
        )
        .await?;
        self.courses.update_request_types(id, &types).await?;
        info!(course = %id, "Effective request types updated");
        Ok(())
    }

    /// All requests targeting the course, newest first. Instructors only.
    pub async fn get_course_requests(
        &self,
        acting: &ActingUser,
        id: &CourseId,
    ) -> DomainResult<Vec<CourseRequest>> {
        self.require_instructor(acting, id, &format!("viewing requests of course {id}"))
            .await?;
        self.requests.find_by_course(id).await
    }
}
