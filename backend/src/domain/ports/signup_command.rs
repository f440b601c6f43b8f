//! Driving port for account signup.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::signup::SignupRequest;
use crate::domain::user::UserId;

/// Port exposing the signup use case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignupCommand: Send + Sync {
    /// Create the account and return the new user's identifier.
    async fn signup(&self, request: SignupRequest) -> Result<UserId, Error>;
}
