//! Driving port for credential authentication.

use async_trait::async_trait;

use crate::domain::auth::Credentials;
use crate::domain::error::Error;
use crate::domain::user::UserId;

/// Port authenticating login credentials against stored accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Authenticate and return the user's identifier.
    ///
    /// Unknown emails, federated-only accounts, and wrong passwords all fail
    /// with the same `unauthorized` error so responses do not reveal which
    /// addresses exist.
    async fn authenticate(&self, credentials: &Credentials) -> Result<UserId, Error>;
}
