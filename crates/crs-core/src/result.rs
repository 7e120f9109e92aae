//! Convenience result type alias for CRS.

use crate::error::DomainError;

/// A specialized `Result` type for CRS domain operations.
///
/// Defined as a convenience so that every crate does not need to write
/// `Result<T, DomainError>` explicitly.
pub type DomainResult<T> = Result<T, DomainError>;
