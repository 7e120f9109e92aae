//! Email notifications for request and response events.

pub mod mailer;
pub mod service;

pub use mailer::Mailer;
pub use service::NotificationService;
