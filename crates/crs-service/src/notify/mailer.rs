//! SMTP mailer with a suppressed fallback mode.

use lettre::message::header::ContentType;
use lettre::message::{Mailbox, Message, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use tracing::{info, warn};

use crs_core::config::notify::NotifyConfig;
use crs_core::error::DomainError;
use crs_core::result::DomainResult;

/// Sends notification emails over SMTP.
///
/// When the SMTP configuration is incomplete the mailer runs in suppressed
/// mode: messages are logged instead of sent, and `send` always succeeds.
pub struct Mailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
}

impl Mailer {
    /// Build a mailer from configuration.
    pub fn from_config(config: &NotifyConfig) -> DomainResult<Self> {
        if !config.is_enabled() {
            warn!("SMTP configuration is incomplete; notification emails are suppressed");
            return Ok(Self {
                transport: None,
                from: String::new(),
            });
        }

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| DomainError::Configuration(format!("Invalid SMTP relay: {e}")))?
            .port(config.smtp_port);

        if !config.smtp_user.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.smtp_user.clone(),
                config.smtp_pass.clone(),
            ));
        }

        Ok(Self {
            transport: Some(builder.build()),
            from: config.from.clone(),
        })
    }

    /// Send an HTML email to the given recipients.
    pub async fn send(
        &self,
        to: &[String],
        cc: &[String],
        subject: &str,
        html: String,
    ) -> DomainResult<()> {
        if to.is_empty() && cc.is_empty() {
            return Ok(());
        }

        let Some(transport) = &self.transport else {
            info!(?to, ?cc, subject, "Email suppressed (SMTP not configured)");
            return Ok(());
        };

        let from = self
            .from
            .parse::<Mailbox>()
            .map_err(|e| DomainError::Configuration(format!("Invalid From mailbox: {e}")))?;

        let mut builder = Message::builder().from(from).subject(subject);
        for addr in to {
            builder = builder.to(parse_mailbox(addr)?);
        }
        for addr in cc {
            builder = builder.cc(parse_mailbox(addr)?);
        }

        let message = builder
            .singlepart(
                SinglePart::builder()
                    .header(ContentType::TEXT_HTML)
                    .body(html),
            )
            .map_err(|e| DomainError::Notification(format!("Failed to build email: {e}")))?;

        transport
            .send(message)
            .await
            .map_err(|e| DomainError::Notification(format!("Failed to send email: {e}")))?;
        Ok(())
    }
}

fn parse_mailbox(addr: &str) -> DomainResult<Mailbox> {
    addr.parse::<Mailbox>()
        .map_err(|e| DomainError::Notification(format!("Invalid recipient '{addr}': {e}")))
}
