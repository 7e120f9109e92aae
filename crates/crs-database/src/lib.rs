//! # crs-database
//!
//! Store contracts and their implementations for CRS: the PostgreSQL
//! connection pool and repositories used in production, and an in-memory
//! store used by tests.
//!
//! The original system kept users, courses, and requests as document
//! collections; here they are PostgreSQL tables whose embedded documents
//! (enrollment entries, section/assignment maps, request payloads and
//! responses) live in JSONB columns.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{CourseStore, RequestStore, UserStore};
