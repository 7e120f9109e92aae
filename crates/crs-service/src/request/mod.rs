//! Request lifecycle: creation, listing, and one-shot responses.

pub mod service;

pub use service::RequestService;
