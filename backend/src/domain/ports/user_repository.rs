//! Port for user persistence.

use async_trait::async_trait;

use crate::domain::user::{EmailAddress, ProfileChanges, UserId, UserProfile};

/// Errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection {
        /// Adapter diagnostic.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query {
        /// Adapter diagnostic.
        message: String,
    },
    /// The email address is already registered to another user.
    #[error("email address is already registered")]
    DuplicateEmail,
}

impl UserPersistenceError {
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

/// Fields required to create a user at signup.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Identifier generated by the caller.
    pub id: UserId,
    /// Normalised email address.
    pub email: EmailAddress,
    /// Password hash produced by the hashing port.
    pub password_hash: String,
    /// Optional display name.
    pub display_name: Option<String>,
    /// Optional given name.
    pub first_name: Option<String>,
    /// Optional family name.
    pub last_name: Option<String>,
}

/// Credential material for a login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    /// Owning user.
    pub user_id: UserId,
    /// Password hash, absent for federated-only accounts.
    pub password_hash: Option<String>,
}

/// The user fields the draft workflow re-reads before validating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftStatus {
    /// Remaining draft budget in credits.
    pub budget: i32,
    /// Whether a team has already been created.
    pub has_team: bool,
}

/// Port for user storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a freshly signed-up user.
    ///
    /// Fails with [`UserPersistenceError::DuplicateEmail`] when the email is
    /// taken.
    async fn insert(&self, user: &NewUser) -> Result<(), UserPersistenceError>;

    /// Look up login credentials by normalised email.
    async fn find_credentials_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError>;

    /// Fetch the profile read model for a user.
    async fn find_profile(&self, id: &UserId)
    -> Result<Option<UserProfile>, UserPersistenceError>;

    /// Fetch budget and team flag for the draft workflow.
    async fn draft_status(&self, id: &UserId)
    -> Result<Option<DraftStatus>, UserPersistenceError>;

    /// Apply profile field changes, returning the updated profile.
    ///
    /// Returns `None` when the user no longer exists.
    async fn apply_profile_changes(
        &self,
        id: &UserId,
        changes: &ProfileChanges,
    ) -> Result<Option<UserProfile>, UserPersistenceError>;

    /// Replace the stored password hash.
    async fn set_password_hash(
        &self,
        id: &UserId,
        password_hash: &str,
    ) -> Result<(), UserPersistenceError>;

    /// Identify which user, if any, owns an email address.
    async fn email_owner(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserId>, UserPersistenceError>;

    /// Apply a verified email change, marking the address verified.
    ///
    /// Fails with [`UserPersistenceError::DuplicateEmail`] when another user
    /// claimed the address in the meantime.
    async fn apply_email_change(
        &self,
        id: &UserId,
        email: &EmailAddress,
    ) -> Result<(), UserPersistenceError>;
}
