//! Driving port for the roster catalog read model.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::roster::CatalogPlayer;

/// Port exposing the draftable player catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogQuery: Send + Sync {
    /// Every draftable player with its school name, ordered by role
    /// ascending then value descending.
    async fn list_players(&self) -> Result<Vec<CatalogPlayer>, Error>;
}
