//! Port for applying the school/player seed catalog.

use async_trait::async_trait;

use crate::domain::roster::Role;

/// Errors raised by seed repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeedPersistenceError {
    /// Repository connection could not be established.
    #[error("seed repository connection failed: {message}")]
    Connection {
        /// Adapter diagnostic.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("seed repository query failed: {message}")]
    Query {
        /// Adapter diagnostic.
        message: String,
    },
}

impl SeedPersistenceError {
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

/// One player to seed under a school.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedPlayer {
    /// Player name, unique within the school.
    pub name: String,
    /// Roster position.
    pub role: Role,
    /// Draft cost in credits.
    pub value: i32,
}

/// One school with its roster to seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSchool {
    /// School name, unique across the catalog.
    pub name: String,
    /// Players fielded by the school.
    pub players: Vec<SeedPlayer>,
}

/// How many rows the seed run actually created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    /// Newly inserted schools.
    pub schools_created: usize,
    /// Newly inserted players.
    pub players_created: usize,
}

/// Port applying the catalog idempotently in a single transaction: schools
/// upserted by name, players inserted only when absent.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SeedRepository: Send + Sync {
    /// Apply the catalog; re-running with the same data is a no-op.
    async fn apply(&self, schools: &[SeedSchool]) -> Result<SeedOutcome, SeedPersistenceError>;
}
