//! Roster catalog read model.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::ports::{CatalogPersistenceError, CatalogQuery, CatalogRepository};
use crate::domain::roster::CatalogPlayer;

/// Catalog read service: the full player list, presentation ordered.
#[derive(Clone)]
pub struct CatalogService<C> {
    catalog: Arc<C>,
}

impl<C> CatalogService<C> {
    /// Create a new service over the given repository.
    pub const fn new(catalog: Arc<C>) -> Self {
        Self { catalog }
    }
}

fn map_catalog_error(error: CatalogPersistenceError) -> Error {
    match error {
        CatalogPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("catalog unavailable: {message}"))
        }
        CatalogPersistenceError::Query { message } => {
            Error::internal(format!("catalog error: {message}"))
        }
    }
}

/// Sort players for presentation: role ascending, then value descending,
/// name as the stable tiebreak.
fn sort_for_catalog(players: &mut [CatalogPlayer]) {
    players.sort_by(|a, b| {
        a.role
            .cmp(&b.role)
            .then(b.value.cmp(&a.value))
            .then_with(|| a.name.cmp(&b.name))
    });
}

#[async_trait]
impl<C> CatalogQuery for CatalogService<C>
where
    C: CatalogRepository,
{
    async fn list_players(&self) -> Result<Vec<CatalogPlayer>, Error> {
        let mut players = self
            .catalog
            .list_players()
            .await
            .map_err(map_catalog_error)?;
        sort_for_catalog(&mut players);
        Ok(players)
    }
}
