//! Pure authorization guards over a user's enrollment records.
//!
//! Guards never degrade silently: failure is a typed permission error
//! carrying the attempted operation description for diagnostics.

use crs_core::error::DomainError;
use crs_core::result::DomainResult;
use crs_entity::course::{Class, CourseId};
use crs_entity::user::{Role, User};

/// Require the user to hold at least one of `allowed` anywhere in the
/// course (any section).
pub fn assert_course_role(
    user: &User,
    course: &CourseId,
    allowed: &[Role],
    operation: &str,
) -> DomainResult<()> {
    if allowed.iter().any(|r| user.has_course_role(course, *r)) {
        Ok(())
    } else {
        Err(DomainError::CoursePermission {
            email: user.email.clone(),
            roles: join_roles(allowed),
            course: course.to_string(),
            operation: operation.to_string(),
        })
    }
}

/// Require the user to hold at least one of `allowed` in the specific
/// class (course + section).
pub fn assert_class_role(
    user: &User,
    class: &Class,
    allowed: &[Role],
    operation: &str,
) -> DomainResult<()> {
    if allowed.iter().any(|r| user.has_class_role(class, *r)) {
        Ok(())
    } else {
        Err(DomainError::ClassPermission {
            email: user.email.clone(),
            roles: join_roles(allowed),
            class: class.to_string(),
            operation: operation.to_string(),
        })
    }
}

fn join_roles(roles: &[Role]) -> String {
    roles
        .iter()
        .map(Role::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crs_entity::user::Enrollment;

    fn course_id() -> CourseId {
        CourseId {
            code: "COMP 1023".to_string(),
            term: "2510".to_string(),
        }
    }

    fn class(section: &str) -> Class {
        Class {
            course: course_id(),
            section: section.to_string(),
        }
    }

    fn instructor() -> User {
        User {
            email: "i@ust.hk".to_string(),
            name: "Instructor".to_string(),
            enrollment: vec![Enrollment {
                course: course_id(),
                role: Role::Instructor,
                sections: vec!["L1".to_string()],
            }],
        }
    }

    #[test]
    fn test_course_role_any_section() {
        let user = instructor();
        assert!(
            assert_course_role(&user, &course_id(), &[Role::Instructor], "updating sections")
                .is_ok()
        );
        // Course-level checks ignore the section entirely.
        assert!(assert_course_role(&user, &course_id(), &[Role::Ta, Role::Instructor], "x").is_ok());
    }

    #[test]
    fn test_course_role_denied() {
        let user = instructor();
        let err = assert_course_role(&user, &course_id(), &[Role::Student], "creating a request")
            .unwrap_err();
        match err {
            DomainError::CoursePermission {
                email, operation, ..
            } => {
                assert_eq!(email, "i@ust.hk");
                assert_eq!(operation, "creating a request");
            }
            other => panic!("expected CoursePermission, got {other:?}"),
        }
    }

    #[test]
    fn test_class_role_scoped_to_section() {
        let user = instructor();
        assert!(assert_class_role(&user, &class("L1"), &[Role::Instructor], "x").is_ok());
        let err = assert_class_role(&user, &class("L2"), &[Role::Instructor], "viewing students")
            .unwrap_err();
        match err {
            DomainError::ClassPermission { class, roles, .. } => {
                assert_eq!(class, "COMP 1023 @ 2510 - L2");
                assert_eq!(roles, "instructor");
            }
            other => panic!("expected ClassPermission, got {other:?}"),
        }
    }
}
