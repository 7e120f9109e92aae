//! # crs-api
//!
//! HTTP API layer for CRS: the axum router, handlers, DTOs, the
//! bearer-token identity extractor, and the mapping of domain errors to
//! HTTP responses. The typed operations mirror the upstream RPC surface;
//! identity verification itself belongs to the upstream provider — this
//! layer only reads the verified email and display name from the token.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
