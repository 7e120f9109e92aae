//! Acting-user context passed explicitly into every service operation.

use serde::{Deserialize, Serialize};

/// The verified identity of the caller of an operation.
///
/// Established upstream by the identity-token collaborator and passed into
/// each service call (context passing — no service value captures an
/// identity). The email is the user's unique identifier; the name is the
/// display name as reported by the identity provider on this login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActingUser {
    /// Verified email address.
    pub email: String,
    /// Display name from the identity provider.
    pub name: String,
}

impl ActingUser {
    /// Creates a new acting-user context.
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }
}
