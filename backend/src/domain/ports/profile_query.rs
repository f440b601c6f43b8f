//! Driving port for profile and budget reads.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::user::{UserId, UserProfile};

/// Port exposing the authenticated user's profile and budget.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    /// Fetch the profile read model.
    async fn fetch_profile(&self, user_id: UserId) -> Result<UserProfile, Error>;

    /// Fetch the current draft budget, falling back to the default when the
    /// user record is absent.
    async fn fetch_budget(&self, user_id: UserId) -> Result<i32, Error>;
}
