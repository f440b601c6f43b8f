//! Outbound email adapters.
//!
//! [`ResendMailer`] talks to a Resend-style transactional HTTP API; the
//! [`LogMailer`] fallback writes messages to the log for environments
//! without an API key (local development, tests).

mod resend;

pub use resend::{MailerSettings, ResendMailer};

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{EmailMessage, Mailer, MailerError};

/// Mailer that logs instead of sending; always succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        info!(
            to = %message.to,
            subject = %message.subject,
            "mail delivery disabled; logging message instead"
        );
        Ok(())
    }
}
