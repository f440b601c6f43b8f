//! Driving port for profile mutations.

use async_trait::async_trait;

use crate::domain::auth::Password;
use crate::domain::error::Error;
use crate::domain::user::{ProfileChanges, UserId, UserProfile};

/// Port exposing profile update and password change.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileCommand: Send + Sync {
    /// Apply profile field changes and return the updated profile.
    async fn update_profile(
        &self,
        user_id: UserId,
        changes: ProfileChanges,
    ) -> Result<UserProfile, Error>;

    /// Hash and store a new password.
    async fn change_password(&self, user_id: UserId, password: Password) -> Result<(), Error>;
}
