//! Course offering model.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::request::RequestKind;

/// Identity of a course offering: the (code, term) pair, unique together.
///
/// The term code encodes academic year and semester, e.g. `2510` for the
/// 2025-26 Fall term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CourseId {
    /// The course code, e.g. `COMP 1023`.
    pub code: String,
    /// The term code, e.g. `2510`.
    pub term: String,
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.code, self.term)
    }
}

/// A single scheduled meeting of a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    /// Weekday, 1 (Monday) through 7 (Sunday).
    pub day: u8,
    /// Start time.
    pub from: NaiveTime,
    /// End time.
    pub to: NaiveTime,
}

/// A section of a course, keyed by section code in [`Course::sections`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Weekly meeting schedule.
    pub schedule: Vec<Meeting>,
}

/// An assignment of a course, keyed by assignment code in
/// [`Course::assignments`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Human-readable assignment name.
    pub name: String,
    /// Due timestamp.
    pub due: DateTime<Utc>,
    /// Maximum extension beyond the due timestamp, in seconds.
    pub max_extension_secs: i64,
}

impl Assignment {
    /// Maximum extension as a duration.
    pub fn max_extension(&self) -> Duration {
        Duration::seconds(self.max_extension_secs)
    }

    /// The latest deadline a deadline-extension request may ask for.
    pub fn latest_extended_due(&self) -> DateTime<Utc> {
        self.due + self.max_extension()
    }
}

/// An offering of a course in a specific term.
///
/// Created by administrative action; sections, assignments, and the
/// effective-request-types toggle are mutated only by instructors enrolled
/// in the course, and always as wholesale overwrites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// The course code, e.g. `COMP 1023`.
    pub code: String,
    /// The term code, e.g. `2510`.
    pub term: String,
    /// The title of the course.
    pub title: String,
    /// Section code → section definition.
    pub sections: BTreeMap<String, Section>,
    /// Assignment code → assignment definition.
    pub assignments: BTreeMap<String, Assignment>,
    /// Request kind → whether students may currently file it. Kinds absent
    /// from the map are not accepted.
    pub effective_request_types: BTreeMap<RequestKind, bool>,
}

impl Course {
    /// This course's identity.
    pub fn id(&self) -> CourseId {
        CourseId {
            code: self.code.clone(),
            term: self.term.clone(),
        }
    }

    /// Whether the section code is defined for this course.
    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    /// Whether students may currently file requests of the given kind.
    pub fn accepts(&self, kind: RequestKind) -> bool {
        self.effective_request_types.get(&kind).copied().unwrap_or(false)
    }
}
