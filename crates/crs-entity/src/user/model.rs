//! User entity model.

use serde::{Deserialize, Serialize};

use crate::course::{Class, CourseId};

use super::role::Role;

/// A user's role in one or more sections of a course.
///
/// Embedded in [`User`]; never updated in place — enrollment changes are
/// expressed as create/delete of whole entries. A user may hold several
/// entries for the same course (e.g. student in one section, TA in
/// another), and readers must tolerate duplicate entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    /// The course the enrollment belongs to.
    pub course: CourseId,
    /// The role held.
    pub role: Role,
    /// Section codes the role applies to, e.g. `["L1", "T1"]`.
    pub sections: Vec<String>,
}

/// A registered user, keyed by email.
///
/// Created lazily on first successful login (see the user service's
/// `sync`), or when an instructor grants an enrollment to an address that
/// has never logged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Email address; the unique identifier and login identity.
    pub email: String,
    /// Display name, synchronized from the identity provider on login.
    pub name: String,
    /// The user's enrollment records.
    pub enrollment: Vec<Enrollment>,
}

impl User {
    /// Whether the user holds `role` anywhere in the course, regardless of
    /// section.
    pub fn has_course_role(&self, course: &CourseId, role: Role) -> bool {
        self.enrollment
            .iter()
            .any(|e| e.course == *course && e.role == role)
    }

    /// Whether the user holds `role` in the specific class, i.e. an
    /// enrollment entry matches the course, the role, and lists the
    /// class's section.
    pub fn has_class_role(&self, class: &Class, role: Role) -> bool {
        self.enrollment.iter().any(|e| {
            e.course == class.course && e.role == role && e.sections.contains(&class.section)
        })
    }

    /// Whether the user holds any role at all in the specific class.
    pub fn is_enrolled_in_class(&self, class: &Class) -> bool {
        Role::ALL.iter().any(|role| self.has_class_role(class, *role))
    }

    /// The distinct courses referenced by the user's enrollment list, in
    /// first-seen order.
    pub fn enrolled_courses(&self) -> Vec<CourseId> {
        let mut seen = Vec::new();
        for e in &self.enrollment {
            if !seen.contains(&e.course) {
                seen.push(e.course.clone());
            }
        }
        seen
    }

    /// The classes in which the user holds `role`, expanding each
    /// enrollment entry into one class per listed section.
    pub fn classes_with_role(&self, role: Role) -> Vec<Class> {
        let mut classes = Vec::new();
        for e in self.enrollment.iter().filter(|e| e.role == role) {
            for section in &e.sections {
                let class = Class {
                    course: e.course.clone(),
                    section: section.clone(),
                };
                if !classes.contains(&class) {
                    classes.push(class);
                }
            }
        }
        classes
    }
}
