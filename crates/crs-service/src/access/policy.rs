//! Configurable who-may-view-whom policy for class rosters.

use crs_core::config::policy::PolicyConfig;
use crs_core::error::DomainError;
use crs_core::result::DomainResult;
use crs_entity::user::Role;

/// The viewer-role table driving `get_users_from_class`.
///
/// Which roles a viewer must hold in a class to list its members depends
/// on the role being viewed. The default table: class staff may view
/// students; anyone in the class may view the instructors and TAs. The
/// table is policy, not code — deployments override it in configuration.
#[derive(Debug, Clone)]
pub struct ViewerPolicy {
    student_viewers: Vec<Role>,
    staff_viewers: Vec<Role>,
}

impl Default for ViewerPolicy {
    fn default() -> Self {
        Self {
            student_viewers: vec![Role::Instructor, Role::Ta],
            staff_viewers: vec![Role::Student, Role::Instructor, Role::Ta],
        }
    }
}

impl ViewerPolicy {
    /// Build the policy from configuration. Unknown role names fail fast
    /// at startup.
    pub fn from_config(config: &PolicyConfig) -> DomainResult<Self> {
        Ok(Self {
            student_viewers: parse_roles(&config.student_viewers)?,
            staff_viewers: parse_roles(&config.staff_viewers)?,
        })
    }

    /// The roles a viewer must hold (any of) in the class to view members
    /// holding `viewed`.
    pub fn allowed_viewers(&self, viewed: Role) -> &[Role] {
        match viewed {
            Role::Student => &self.student_viewers,
            Role::Instructor | Role::Ta => &self.staff_viewers,
        }
    }
}

fn parse_roles(names: &[String]) -> DomainResult<Vec<Role>> {
    names
        .iter()
        .map(|name| {
            name.parse::<Role>().map_err(|_| {
                DomainError::Configuration(format!("Unknown role '{name}' in viewer policy"))
            })
        })
        .collect()
}
