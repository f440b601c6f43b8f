//! Port for outbound transactional email.

use async_trait::async_trait;

use crate::domain::user::EmailAddress;

/// Errors raised by mailer adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MailerError {
    /// The mail service rejected or failed to accept the message.
    #[error("mail delivery failed: {message}")]
    Delivery {
        /// Adapter diagnostic.
        message: String,
    },
}

impl MailerError {
    /// Create a delivery error with the given message.
    pub fn delivery(message: impl Into<String>) -> Self {
        Self::Delivery {
            message: message.into(),
        }
    }
}

/// A pre-rendered transactional message.
///
/// Template rendering is out of scope; services hand over final text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Recipient address.
    pub to: EmailAddress,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// Port for handing a message to the transactional mail service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Submit the message for delivery.
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError>;
}
