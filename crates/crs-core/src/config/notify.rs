//! Email notification configuration.

use serde::{Deserialize, Serialize};

/// SMTP and link configuration for outgoing notification emails.
///
/// When `smtp_host` is empty, email dispatch runs in suppressed mode:
/// messages are logged instead of sent. Sending is always fire-and-forget;
/// a dispatch failure never affects the operation that triggered it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// SMTP relay hostname. Empty disables sending.
    #[serde(default)]
    pub smtp_host: String,
    /// SMTP relay port.
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// SMTP username (optional; unauthenticated relay when empty).
    #[serde(default)]
    pub smtp_user: String,
    /// SMTP password.
    #[serde(default)]
    pub smtp_pass: String,
    /// `From` mailbox for outgoing mail, e.g. `"CRS <noreply@example.edu>"`.
    #[serde(default)]
    pub from: String,
    /// Public base URL used to build request/response links in emails.
    #[serde(default)]
    pub base_url: String,
}

impl NotifyConfig {
    /// Whether the configuration is complete enough to actually send mail.
    pub fn is_enabled(&self) -> bool {
        !self.smtp_host.is_empty() && !self.from.is_empty() && !self.base_url.is_empty()
    }
}

fn default_smtp_port() -> u16 {
    587
}
