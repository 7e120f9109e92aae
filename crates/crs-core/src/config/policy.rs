//! Viewer-role policy configuration.

use serde::{Deserialize, Serialize};

/// Configurable who-may-view-whom table for class rosters.
///
/// Role names are parsed by the service layer; unknown names are rejected
/// at startup. Defaults follow the standard table: class staff may view
/// students, and anyone in the class may view the staff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Roles allowed to view the students of a class.
    #[serde(default = "default_student_viewers")]
    pub student_viewers: Vec<String>,
    /// Roles allowed to view the instructors/TAs of a class.
    #[serde(default = "default_staff_viewers")]
    pub staff_viewers: Vec<String>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            student_viewers: default_student_viewers(),
            staff_viewers: default_staff_viewers(),
        }
    }
}

fn default_student_viewers() -> Vec<String> {
    vec!["instructor".to_string(), "ta".to_string()]
}

fn default_staff_viewers() -> Vec<String> {
    vec![
        "student".to_string(),
        "instructor".to_string(),
        "ta".to_string(),
    ]
}
