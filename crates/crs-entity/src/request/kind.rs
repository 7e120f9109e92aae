//! Request kind enumeration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The defined request kinds.
///
/// Serialized with the display names used throughout the system, which
/// also key the per-course effective-request-types map.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum RequestKind {
    /// Swap from one section of a course to another.
    #[serde(rename = "Swap Section")]
    SwapSection,
    /// Extend an assignment deadline.
    #[serde(rename = "Deadline Extension")]
    DeadlineExtension,
}

impl RequestKind {
    /// Return the kind's display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SwapSection => "Swap Section",
            Self::DeadlineExtension => "Deadline Extension",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_names() {
        assert_eq!(
            serde_json::to_string(&RequestKind::SwapSection).unwrap(),
            "\"Swap Section\""
        );
        assert_eq!(
            serde_json::to_string(&RequestKind::DeadlineExtension).unwrap(),
            "\"Deadline Extension\""
        );
    }

    #[test]
    fn test_usable_as_map_key() {
        let map = std::collections::BTreeMap::from([
            (RequestKind::SwapSection, true),
            (RequestKind::DeadlineExtension, false),
        ]);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(
            json,
            "{\"Swap Section\":true,\"Deadline Extension\":false}"
        );
        let back: std::collections::BTreeMap<RequestKind, bool> =
            serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
