//! Class identifier: a specific section of a course offering.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::CourseId;

/// A specific (course, section) pair — the granularity at which role-based
/// viewing and request permissions are checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Class {
    /// The course offering.
    pub course: CourseId,
    /// The section code, e.g. `L1`.
    pub section: String,
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.course, self.section)
    }
}
