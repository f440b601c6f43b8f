//! Port for the atomic team-draft commit.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::team::TeamName;
use crate::domain::user::UserId;

/// Errors raised by draft commit adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftCommitError {
    /// The user already owns a team; raised when the storage-level
    /// uniqueness constraint fires inside the transaction.
    #[error("user already has a team")]
    AlreadyHasTeam,
    /// Repository connection could not be established.
    #[error("draft repository connection failed: {message}")]
    Connection {
        /// Adapter diagnostic.
        message: String,
    },
    /// The transaction failed for any other storage reason; no partial state
    /// is retained.
    #[error("draft commit failed: {message}")]
    Query {
        /// Adapter diagnostic.
        message: String,
    },
}

impl DraftCommitError {
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

/// Everything the adapter needs to commit a validated draft in one
/// transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamCommit {
    /// Identifier for the new team, generated by the caller.
    pub team_id: Uuid,
    /// Owning user.
    pub user_id: UserId,
    /// Validated team name.
    pub name: TeamName,
    /// The fifteen selected player ids.
    pub player_ids: Vec<Uuid>,
    /// Summed draft cost debited from the user's budget.
    pub total_cost: i32,
}

/// Port committing a validated draft.
///
/// Implementations must create the team row, its roster links, and the
/// user's `has_team`/budget update as a single all-or-nothing unit.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DraftRepository: Send + Sync {
    /// Commit the draft atomically.
    async fn commit_team(&self, commit: &TeamCommit) -> Result<(), DraftCommitError>;
}
