//! Port wrapping the password hashing primitive.
//!
//! The domain neither selects nor tunes the algorithm; it asks for a hash and
//! for a verification verdict. The production adapter wraps `bcrypt` and runs
//! it off the async runtime.

use async_trait::async_trait;

use crate::domain::auth::Password;

/// Errors raised by password hashing adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// Hashing or verification failed inside the primitive.
    #[error("password hashing failed: {message}")]
    Primitive {
        /// Adapter diagnostic.
        message: String,
    },
}

impl PasswordHashError {
    /// Create a primitive error with the given message.
    pub fn primitive(message: impl Into<String>) -> Self {
        Self::Primitive {
            message: message.into(),
        }
    }
}

/// Port for hashing and verifying passwords.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a policy-checked password for storage.
    async fn hash(&self, password: &Password) -> Result<String, PasswordHashError>;

    /// Verify a raw login password against a stored hash.
    async fn verify(&self, raw: &str, stored_hash: &str) -> Result<bool, PasswordHashError>;
}
