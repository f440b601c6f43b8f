//! Port for email verification tokens.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Errors raised by verification token adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenPersistenceError {
    /// Repository connection could not be established.
    #[error("token repository connection failed: {message}")]
    Connection {
        /// Adapter diagnostic.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("token repository query failed: {message}")]
    Query {
        /// Adapter diagnostic.
        message: String,
    },
}

impl TokenPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// A stored verification token.
///
/// The identifier encodes the pending operation, e.g.
/// `email-change:<user_id>:<new_email>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationToken {
    /// Operation identifier.
    pub identifier: String,
    /// Opaque token value handed to the user.
    pub token: String,
    /// Expiry instant; tokens past this point are dead.
    pub expires_at: DateTime<Utc>,
}

/// Port for verification token storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VerificationTokenRepository: Send + Sync {
    /// Store a token record.
    async fn put(&self, record: &VerificationToken) -> Result<(), TokenPersistenceError>;

    /// Find a token whose identifier starts with `identifier_prefix`.
    async fn find_by_prefix(
        &self,
        identifier_prefix: &str,
        token: &str,
    ) -> Result<Option<VerificationToken>, TokenPersistenceError>;

    /// Delete every token whose identifier starts with `identifier_prefix`.
    async fn delete_by_prefix(&self, identifier_prefix: &str)
    -> Result<(), TokenPersistenceError>;
}
