//! Credential authentication service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::auth::Credentials;
use crate::domain::error::Error;
use crate::domain::ports::{
    LoginService, PasswordHashError, PasswordHasher, UserPersistenceError, UserRepository,
};
use crate::domain::user::UserId;

const BAD_CREDENTIALS: &str = "invalid email or password";

/// Password login over the user repository and the hashing primitive.
///
/// Federated-only accounts (no stored hash) fail identically to a wrong
/// password so the response does not reveal how an address signed up.
#[derive(Clone)]
pub struct PasswordLoginService<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> PasswordLoginService<R, H> {
    /// Create a new service over the given ports.
    pub const fn new(users: Arc<R>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        other => Error::internal(format!("user repository error: {other}")),
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(format!("password verification failed: {error}"))
}

#[async_trait]
impl<R, H> LoginService for PasswordLoginService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &Credentials) -> Result<UserId, Error> {
        let stored = self
            .users
            .find_credentials_by_email(credentials.email())
            .await
            .map_err(map_user_error)?;

        let Some(stored) = stored else {
            return Err(Error::unauthorized(BAD_CREDENTIALS));
        };
        let Some(hash) = stored.password_hash else {
            return Err(Error::unauthorized(BAD_CREDENTIALS));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &hash)
            .await
            .map_err(map_hash_error)?;
        if !matches {
            return Err(Error::unauthorized(BAD_CREDENTIALS));
        }

        Ok(stored.user_id)
    }
}
