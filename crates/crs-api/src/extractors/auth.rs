//! `AuthUser` extractor — reads the verified identity from the bearer token.
//!
//! Token issuance and the login flow belong to the upstream identity
//! provider; by the time a request reaches CRS the token's claims carry a
//! verified email and display name. This extractor checks the signature
//! and hands the identity to handlers as an [`ActingUser`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crs_core::error::DomainError;
use crs_service::context::ActingUser;

use crate::error::ApiError;
use crate::state::AppState;

/// Claims carried by an identity token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Verified email address (the subject).
    pub sub: String,
    /// Display name as reported by the identity provider.
    pub name: String,
    /// Expiry, as a Unix timestamp.
    pub exp: i64,
}

/// Extracted authenticated identity available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub ActingUser);

impl std::ops::Deref for AuthUser {
    type Target = ActingUser;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| DomainError::unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| DomainError::unauthorized("Invalid Authorization header format"))?;

        let claims = decode_token(token, &state.config.auth.token_secret)?;

        Ok(AuthUser(ActingUser::new(claims.sub, claims.name)))
    }
}

/// Decode and validate an identity token.
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, DomainError> {
    jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| DomainError::unauthorized(format!("Invalid token: {e}")))
}

/// Issue an identity token. Used by tests and local development tooling;
/// production tokens come from the identity provider.
pub fn issue_token(
    email: &str,
    name: &str,
    secret: &str,
    expires_at: i64,
) -> Result<String, DomainError> {
    let claims = Claims {
        sub: email.to_string(),
        name: name.to_string(),
        exp: expires_at,
    };
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| DomainError::unauthorized(format!("Failed to issue token: {e}")))
}
