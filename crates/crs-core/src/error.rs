//! Unified domain error types for CRS.
//!
//! All crates map their failures into [`DomainError`] for consistent
//! propagation through the `?` operator. Every message names the offending
//! resource, role, or operation so the error can be shown to a caller
//! without leaking internals.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Top-level classification of a [`DomainError`], used by the API layer to
/// pick an HTTP status. Domain code matches on the error variants
/// themselves; the kind only exists for boundary mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The caller's identity could not be established.
    Unauthorized,
    /// A resource referenced by identity does not exist.
    NotFound,
    /// The acting user lacks a required role for the operation.
    Forbidden,
    /// A conflicting state already exists (duplicate course, answered request).
    Conflict,
    /// Input validation failed.
    Validation,
    /// The persistent store rejected or failed an operation.
    Store,
    /// A configuration error occurred.
    Configuration,
    /// An external collaborator (e.g. the mail relay) failed.
    ExternalService,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "UNAUTHORIZED"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Forbidden => write!(f, "FORBIDDEN"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Store => write!(f, "STORE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::ExternalService => write!(f, "EXTERNAL_SERVICE"),
        }
    }
}

/// The error taxonomy of the CRS domain core.
///
/// Every variant is an expected, typed outcome of an operation, not an
/// invariant violation. Store connectivity failures are wrapped in
/// [`DomainError::Store`] and propagate opaquely without retry.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The caller's identity could not be established (missing or invalid
    /// bearer token). Raised at the API boundary, before any service runs.
    #[error("{0}")]
    Unauthorized(String),

    /// No user record exists for the given email.
    #[error("User {email} not found")]
    UserNotFound {
        /// Email that failed to resolve.
        email: String,
    },

    /// No course exists for the given (code, term) pair.
    #[error("Course {code} ({term}) not found")]
    CourseNotFound {
        /// Course code.
        code: String,
        /// Term code.
        term: String,
    },

    /// The section is not defined in the course's section map.
    #[error("Section {section} not found in course {code} ({term})")]
    SectionNotFound {
        /// Course code.
        code: String,
        /// Term code.
        term: String,
        /// The missing section code.
        section: String,
    },

    /// No request exists with the given identity.
    #[error("Request {id} not found")]
    RequestNotFound {
        /// Request identity.
        id: Uuid,
    },

    /// The acting user does not hold any of the required roles anywhere in
    /// the course.
    #[error("User {email} does not have a role in [{roles}] in course {course} for {operation}")]
    CoursePermission {
        /// Acting user's email.
        email: String,
        /// Comma-joined list of roles that would have been accepted.
        roles: String,
        /// Canonical course identifier string.
        course: String,
        /// Description of the attempted operation.
        operation: String,
    },

    /// The acting user does not hold any of the required roles in the
    /// specific class (course + section).
    #[error("User {email} does not have a role in [{roles}] in class {class} for {operation}")]
    ClassPermission {
        /// Acting user's email.
        email: String,
        /// Comma-joined list of roles that would have been accepted.
        roles: String,
        /// Canonical class identifier string.
        class: String,
        /// Description of the attempted operation.
        operation: String,
    },

    /// The acting user holds no enrollment in the class at all (distinct
    /// from holding the wrong role).
    #[error("User {email} is not enrolled in the class {class}")]
    NotEnrolled {
        /// Acting user's email.
        email: String,
        /// Canonical class identifier string.
        class: String,
    },

    /// A second response was attempted on an already-answered request.
    #[error("Request {id} already has a response")]
    ResponseAlreadyExists {
        /// Request identity.
        id: Uuid,
    },

    /// A course with the same (code, term) already exists.
    #[error("Course {code} ({term}) already exists")]
    CourseAlreadyExists {
        /// Course code.
        code: String,
        /// Term code.
        term: String,
    },

    /// Input validation failed.
    #[error("{0}")]
    Validation(String),

    /// A mutation that was expected to persist did not (store rejected the
    /// write). Treated as unexpected; never retried automatically.
    #[error("Failed to persist: {0}")]
    Integrity(String),

    /// The underlying store failed.
    #[error("Store error: {message}")]
    Store {
        /// Human-readable description of the failed operation.
        message: String,
        /// Underlying driver error, when available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A configuration error occurred.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Email notification dispatch failed. Logged and swallowed by the
    /// triggering operation, never surfaced to its caller.
    #[error("Notification error: {0}")]
    Notification(String),
}

impl DomainError {
    /// Classify this error for boundary (HTTP status) mapping.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::UserNotFound { .. }
            | Self::CourseNotFound { .. }
            | Self::SectionNotFound { .. }
            | Self::RequestNotFound { .. } => ErrorKind::NotFound,
            Self::CoursePermission { .. }
            | Self::ClassPermission { .. }
            | Self::NotEnrolled { .. } => ErrorKind::Forbidden,
            Self::ResponseAlreadyExists { .. } | Self::CourseAlreadyExists { .. } => {
                ErrorKind::Conflict
            }
            Self::Validation(_) => ErrorKind::Validation,
            Self::Integrity(_) | Self::Store { .. } => ErrorKind::Store,
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Notification(_) => ErrorKind::ExternalService,
        }
    }

    /// Create a user-not-found error.
    pub fn user_not_found(email: impl Into<String>) -> Self {
        Self::UserNotFound {
            email: email.into(),
        }
    }

    /// Create a course-not-found error.
    pub fn course_not_found(code: impl Into<String>, term: impl Into<String>) -> Self {
        Self::CourseNotFound {
            code: code.into(),
            term: term.into(),
        }
    }

    /// Create a section-not-found error.
    pub fn section_not_found(
        code: impl Into<String>,
        term: impl Into<String>,
        section: impl Into<String>,
    ) -> Self {
        Self::SectionNotFound {
            code: code.into(),
            term: term.into(),
            section: section.into(),
        }
    }

    /// Create a request-not-found error.
    pub fn request_not_found(id: Uuid) -> Self {
        Self::RequestNotFound { id }
    }

    /// Create a store error wrapping an underlying driver failure.
    pub fn store(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Store {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a store error without an underlying cause.
    pub fn store_message(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
            source: None,
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }
}

impl From<config::ConfigError> for DomainError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            DomainError::user_not_found("a@b.c").kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            DomainError::course_not_found("COMP 1023", "2510").kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            DomainError::NotEnrolled {
                email: "a@b.c".into(),
                class: "COMP 1023 @ 2510 - L1".into(),
            }
            .kind(),
            ErrorKind::Forbidden
        );
        assert_eq!(
            DomainError::ResponseAlreadyExists { id: Uuid::nil() }.kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            DomainError::validation("bad input").kind(),
            ErrorKind::Validation
        );
    }

    #[test]
    fn test_messages_name_the_resource() {
        let err = DomainError::course_not_found("COMP 1023", "2510");
        assert_eq!(err.to_string(), "Course COMP 1023 (2510) not found");

        let err = DomainError::section_not_found("COMP 1023", "2510", "L9");
        assert_eq!(
            err.to_string(),
            "Section L9 not found in course COMP 1023 (2510)"
        );

        let err = DomainError::ClassPermission {
            email: "s@ust.hk".into(),
            roles: "instructor".into(),
            class: "COMP 1023 @ 2510 - L1".into(),
            operation: "creating a response".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("s@ust.hk"));
        assert!(msg.contains("instructor"));
        assert!(msg.contains("creating a response"));
    }
}
