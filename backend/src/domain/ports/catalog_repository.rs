//! Port for reading the draftable player catalog.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::roster::{CatalogPlayer, DraftPick};

/// Errors raised by catalog repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogPersistenceError {
    /// Repository connection could not be established.
    #[error("catalog repository connection failed: {message}")]
    Connection {
        /// Adapter diagnostic.
        message: String,
    },
    /// Query failed during execution.
    #[error("catalog repository query failed: {message}")]
    Query {
        /// Adapter diagnostic.
        message: String,
    },
}

impl CatalogPersistenceError {
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

/// Port for the read-only player catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Every draftable player with its school name, ordered by role ascending
    /// then value descending. No filtering, no pagination.
    async fn list_players(&self) -> Result<Vec<CatalogPlayer>, CatalogPersistenceError>;

    /// Resolve the selected ids to draft picks.
    ///
    /// Ids that do not exist are simply absent from the result; the caller
    /// compares counts.
    async fn find_picks(&self, ids: &[Uuid]) -> Result<Vec<DraftPick>, CatalogPersistenceError>;
}

