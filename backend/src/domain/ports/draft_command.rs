//! Driving port for the team draft workflow.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::user::UserId;

/// Port exposing the draft validation and commit use case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DraftCommand: Send + Sync {
    /// Validate the candidate roster and commit the team atomically.
    async fn create_team(
        &self,
        user_id: UserId,
        name: &str,
        player_ids: &[Uuid],
    ) -> Result<(), Error>;
}
