//! User service — login sync, roster queries, enrollment management.

use std::sync::Arc;

use tracing::info;

use crs_core::error::DomainError;
use crs_core::result::DomainResult;
use crs_database::store::UserStore;
use crs_entity::course::{Class, CourseId};
use crs_entity::user::{Enrollment, Role, User};

use crate::access::guards::{assert_class_role, assert_course_role};
use crate::access::policy::ViewerPolicy;
use crate::context::ActingUser;

/// Handles user records and their enrollment.
pub struct UserService {
    /// User store.
    users: Arc<dyn UserStore>,
    /// Viewer-role policy for class rosters.
    policy: ViewerPolicy,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserStore>, policy: ViewerPolicy) -> Self {
        Self { users, policy }
    }

    /// Resolve the acting user's own record.
    async fn require_user(&self, email: &str) -> DomainResult<User> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or_else(|| DomainError::user_not_found(email))
    }

    /// Synchronize the acting user's record with the identity provider.
    ///
    /// Idempotently creates the record (empty name, empty enrollment) if
    /// absent, then overwrites the display name. The only self-registration
    /// path; never fails due to the user not existing.
    pub async fn sync(&self, acting: &ActingUser) -> DomainResult<()> {
        self.users.create_if_absent(&acting.email).await?;
        self.users.set_name(&acting.email, &acting.name).await?;
        info!(user = %acting.email, "User synchronized");
        Ok(())
    }

    /// The acting user's full record.
    pub async fn get_current_user(&self, acting: &ActingUser) -> DomainResult<User> {
        self.require_user(&acting.email).await
    }

    /// All users with any enrollment in the course. Instructors only.
    pub async fn get_users_from_course(
        &self,
        acting: &ActingUser,
        course: &CourseId,
    ) -> DomainResult<Vec<User>> {
        let user = self.require_user(&acting.email).await?;
        assert_course_role(
            &user,
            course,
            &[Role::Instructor],
            &format!("viewing users in course {course}"),
        )?;
        self.users.find_by_course(course).await
    }

    /// All users holding `role` in the specific class, subject to the
    /// viewer-role policy.
    pub async fn get_users_from_class(
        &self,
        acting: &ActingUser,
        class: &Class,
        role: Role,
    ) -> DomainResult<Vec<User>> {
        let user = self.require_user(&acting.email).await?;
        assert_class_role(
            &user,
            class,
            self.policy.allowed_viewers(role),
            &format!("viewing {role}s in class {class}"),
        )?;
        self.users.find_by_class_role(class, role).await
    }

    /// Grant an enrollment to a user, creating the user record if absent
    /// so enrollments can be granted to users who never logged in.
    /// Requires the acting user to be an instructor in the enrollment's
    /// course.
    pub async fn create_enrollment_for_user(
        &self,
        acting: &ActingUser,
        target_email: &str,
        enrollment: &Enrollment,
    ) -> DomainResult<()> {
        let user = self.require_user(&acting.email).await?;
        assert_course_role(
            &user,
            &enrollment.course,
            &[Role::Instructor],
            &format!(
                "creating enrollment for user {target_email} in course {}",
                enrollment.course
            ),
        )?;

        self.users.create_if_absent(target_email).await?;
        self.users.add_enrollment(target_email, enrollment).await?;
        info!(
            user = %target_email,
            course = %enrollment.course,
            role = %enrollment.role,
            "Enrollment created"
        );
        Ok(())
    }

    /// Remove a structurally-equal enrollment entry from a user. Removing
    /// a non-existent entry is a no-op. Requires the acting user to be an
    /// instructor in the enrollment's course.
    pub async fn delete_enrollment_for_user(
        &self,
        acting: &ActingUser,
        target_email: &str,
        enrollment: &Enrollment,
    ) -> DomainResult<()> {
        let user = self.require_user(&acting.email).await?;
        assert_course_role(
            &user,
            &enrollment.course,
            &[Role::Instructor],
            &format!(
                "deleting enrollment for user {target_email} in course {}",
                enrollment.course
            ),
        )?;

        self.users.remove_enrollment(target_email, enrollment).await?;
        info!(
            user = %target_email,
            course = %enrollment.course,
            role = %enrollment.role,
            "Enrollment deleted"
        );
        Ok(())
    }
}
