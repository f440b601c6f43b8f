//! bcrypt adapter for the password hashing port.

use async_trait::async_trait;

use crate::domain::auth::Password;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Hashing cost factor; matched to what the original accounts were created
/// with so existing hashes keep verifying.
const BCRYPT_COST: u32 = 12;

/// `PasswordHasher` implementation over the `bcrypt` crate.
///
/// Hashing at cost 12 takes a few hundred milliseconds, so both operations
/// run on the blocking pool instead of stalling the async runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct BcryptPasswordHasher;

fn map_join_error(err: tokio::task::JoinError) -> PasswordHashError {
    PasswordHashError::primitive(format!("hashing task panicked: {err}"))
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &Password) -> Result<String, PasswordHashError> {
        let raw = password.expose().to_owned();
        tokio::task::spawn_blocking(move || bcrypt::hash(raw, BCRYPT_COST))
            .await
            .map_err(map_join_error)?
            .map_err(|err| PasswordHashError::primitive(err.to_string()))
    }

    async fn verify(&self, raw: &str, stored_hash: &str) -> Result<bool, PasswordHashError> {
        let raw = raw.to_owned();
        let stored = stored_hash.to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(raw, &stored))
            .await
            .map_err(map_join_error)?
            .map_err(|err| PasswordHashError::primitive(err.to_string()))
    }
}
