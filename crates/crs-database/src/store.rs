//! Store contracts for the three persistent collections.
//!
//! The services depend on these traits rather than on a concrete driver;
//! production wires in the PostgreSQL repositories, tests the in-memory
//! store. The store is the single source of truth — there is no in-process
//! caching, so every authorization check re-reads current enrollment state.

use async_trait::async_trait;
use uuid::Uuid;

use crs_core::result::DomainResult;
use crs_entity::course::{Class, Course, CourseId};
use crs_entity::request::{CourseRequest, RequestResponse};
use crs_entity::user::{Enrollment, Role, User};

/// Access to the users collection.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by email.
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// Create a user record with empty name and enrollment if none exists.
    /// Idempotent; an existing record is left untouched.
    async fn create_if_absent(&self, email: &str) -> DomainResult<()>;

    /// Overwrite the user's display name.
    async fn set_name(&self, email: &str, name: &str) -> DomainResult<()>;

    /// All users with any enrollment entry in the course, regardless of
    /// role or section.
    async fn find_by_course(&self, course: &CourseId) -> DomainResult<Vec<User>>;

    /// All users holding `role` in the specific class, i.e. with an
    /// enrollment entry matching the course and role whose section list
    /// contains the class's section.
    async fn find_by_class_role(&self, class: &Class, role: Role) -> DomainResult<Vec<User>>;

    /// Append an enrollment entry with set-add semantics: appending an
    /// entry structurally equal to an existing one is a no-op.
    async fn add_enrollment(&self, email: &str, enrollment: &Enrollment) -> DomainResult<()>;

    /// Remove structurally-equal enrollment entries. Removing an entry
    /// that is not present is a no-op, not an error.
    async fn remove_enrollment(&self, email: &str, enrollment: &Enrollment) -> DomainResult<()>;
}

/// Access to the courses collection.
#[async_trait]
pub trait CourseStore: Send + Sync {
    /// Insert a new course. Fails with `CourseAlreadyExists` when the
    /// (code, term) pair is taken.
    async fn insert(&self, course: &Course) -> DomainResult<()>;

    /// Find a course by its (code, term) identity.
    async fn find_by_id(&self, id: &CourseId) -> DomainResult<Option<Course>>;

    /// Find every course in `ids`; identities that no longer resolve are
    /// silently skipped.
    async fn find_by_ids(&self, ids: &[CourseId]) -> DomainResult<Vec<Course>>;

    /// Overwrite the course's sections map wholesale. Fails with
    /// `CourseNotFound` when the course does not exist.
    async fn update_sections(
        &self,
        id: &CourseId,
        sections: &std::collections::BTreeMap<String, crs_entity::course::Section>,
    ) -> DomainResult<()>;

    /// Overwrite the course's assignments map wholesale.
    async fn update_assignments(
        &self,
        id: &CourseId,
        assignments: &std::collections::BTreeMap<String, crs_entity::course::Assignment>,
    ) -> DomainResult<()>;

    /// Overwrite the course's effective-request-types map wholesale.
    async fn update_request_types(
        &self,
        id: &CourseId,
        types: &std::collections::BTreeMap<crs_entity::request::RequestKind, bool>,
    ) -> DomainResult<()>;
}

/// Access to the requests collection.
#[async_trait]
pub trait RequestStore: Send + Sync {
    /// Insert a new request.
    async fn insert(&self, request: &CourseRequest) -> DomainResult<()>;

    /// Find a request by identity.
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<CourseRequest>>;

    /// The union of requests filed by `email` and requests targeting any
    /// of `instructor_classes`, deduplicated by identity, newest first.
    async fn find_for_user(
        &self,
        email: &str,
        instructor_classes: &[Class],
    ) -> DomainResult<Vec<CourseRequest>>;

    /// All requests targeting the course, newest first.
    async fn find_by_course(&self, course: &CourseId) -> DomainResult<Vec<CourseRequest>>;

    /// Attach `response` to the request if — and only if — it has no
    /// response at write time. Returns whether the update applied. This is
    /// the atomic conditional update that closes the check-then-act race
    /// between concurrent response attempts.
    async fn set_response_if_absent(
        &self,
        id: Uuid,
        response: &RequestResponse,
    ) -> DomainResult<bool>;
}
