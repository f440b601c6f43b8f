//! Driving port for the two-step email change flow.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::user::{EmailAddress, UserId};

/// Port exposing email change request and confirmation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailChangeCommand: Send + Sync {
    /// Start an email change: store a pending token and mail the new address.
    async fn request_change(&self, user_id: UserId, new_email: EmailAddress)
    -> Result<(), Error>;

    /// Apply a pending change identified by its token.
    async fn confirm_change(&self, token: &str) -> Result<(), Error>;
}
