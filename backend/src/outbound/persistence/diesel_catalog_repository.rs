//! PostgreSQL-backed `CatalogRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{CatalogPersistenceError, CatalogRepository};
use crate::domain::roster::{CatalogPlayer, DraftPick, Role};

use super::error_classify::{DieselFailure, classify};
use super::models::{CatalogPlayerRow, DraftPickRow};
use super::pool::{DbPool, PoolError};
use super::schema::{real_players, schools};

/// Diesel-backed implementation of the `CatalogRepository` port.
#[derive(Clone)]
pub struct DieselCatalogRepository {
    pool: DbPool,
}

impl DieselCatalogRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CatalogPersistenceError {
    CatalogPersistenceError::connection(error.to_string())
}

fn map_diesel_error(error: &diesel::result::Error) -> CatalogPersistenceError {
    match classify(error) {
        DieselFailure::Connection(message) => CatalogPersistenceError::connection(message),
        DieselFailure::UniqueViolation(_) | DieselFailure::Query(_) => {
            CatalogPersistenceError::query(error.to_string())
        }
    }
}

/// The role column carries a CHECK constraint, so an unknown code means the
/// store and the application disagree about the schema.
fn parse_role(code: &str) -> Result<Role, CatalogPersistenceError> {
    Role::from_code(code)
        .ok_or_else(|| CatalogPersistenceError::query(format!("unknown role code: {code}")))
}

#[async_trait]
impl CatalogRepository for DieselCatalogRepository {
    async fn list_players(&self) -> Result<Vec<CatalogPlayer>, CatalogPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CatalogPlayerRow> = real_players::table
            .inner_join(schools::table)
            .select((
                real_players::id,
                real_players::name,
                real_players::role,
                real_players::value,
                schools::name,
            ))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err))?;

        rows.into_iter()
            .map(|row| {
                Ok(CatalogPlayer {
                    id: row.id,
                    name: row.name,
                    role: parse_role(&row.role)?,
                    school_name: row.school_name,
                    value: row.value,
                })
            })
            .collect()
    }

    async fn find_picks(&self, ids: &[Uuid]) -> Result<Vec<DraftPick>, CatalogPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<DraftPickRow> = real_players::table
            .filter(real_players::id.eq_any(ids))
            .select(DraftPickRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err))?;

        rows.into_iter()
            .map(|row| {
                Ok(DraftPick {
                    id: row.id,
                    role: parse_role(&row.role)?,
                    value: row.value,
                })
            })
            .collect()
    }
}
