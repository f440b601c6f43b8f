//! Resend-style transactional mail adapter.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::ports::{EmailMessage, Mailer, MailerError};

const DEFAULT_API_BASE: &str = "https://api.resend.com";

/// Settings for the transactional mail service.
#[derive(Debug, Clone)]
pub struct MailerSettings {
    /// Bearer token for the API.
    pub api_key: String,
    /// Sender address shown to recipients.
    pub from: String,
    /// API base URL; overridable for tests and sandboxes.
    pub api_base: String,
}

impl MailerSettings {
    /// Settings against the production API.
    pub fn new(api_key: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            from: from.into(),
            api_base: DEFAULT_API_BASE.to_owned(),
        }
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
}

/// `Mailer` implementation over the Resend HTTP API.
#[derive(Clone)]
pub struct ResendMailer {
    client: reqwest::Client,
    settings: MailerSettings,
}

impl ResendMailer {
    /// Create an adapter with its own HTTP client.
    #[must_use]
    pub fn new(settings: MailerSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        let request = SendRequest {
            from: &self.settings.from,
            to: [message.to.as_ref()],
            subject: &message.subject,
            text: &message.body,
        };

        let response = self
            .client
            .post(format!("{}/emails", self.settings.api_base))
            .bearer_auth(&self.settings.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| MailerError::delivery(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(MailerError::delivery(format!(
                "mail API returned {status}"
            )));
        }
        Ok(())
    }
}
