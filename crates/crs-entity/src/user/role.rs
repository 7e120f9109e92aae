//! Enrollment role enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Roles a user can hold within a course section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Enrolled student.
    Student,
    /// Course instructor.
    Instructor,
    /// Teaching assistant.
    Ta,
}

impl Role {
    /// All defined roles.
    pub const ALL: [Role; 3] = [Role::Student, Role::Instructor, Role::Ta];

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Instructor => "instructor",
            Self::Ta => "ta",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = crs_core::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "instructor" => Ok(Self::Instructor),
            "ta" => Ok(Self::Ta),
            _ => Err(crs_core::DomainError::validation(format!(
                "Invalid role: '{s}'. Expected one of: student, instructor, ta"
            ))),
        }
    }
}
