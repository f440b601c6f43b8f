//! PostgreSQL-backed catalog seeding adapter.
//!
//! Applies the school/player catalog in a single transaction: schools are
//! upserted by name, players inserted only when `(school_id, name)` is
//! absent. Re-running with the same catalog touches nothing.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{SeedOutcome, SeedPersistenceError, SeedRepository, SeedSchool};

use super::error_classify::{DieselFailure, classify};
use super::models::{NewRealPlayerRow, NewSchoolRow};
use super::pool::{DbPool, PoolError};
use super::schema::{real_players, schools};

/// Diesel-backed implementation of the `SeedRepository` port.
#[derive(Clone)]
pub struct DieselSeedRepository {
    pool: DbPool,
}

impl DieselSeedRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SeedPersistenceError {
    SeedPersistenceError::connection(error.to_string())
}

fn map_diesel_error(error: &diesel::result::Error) -> SeedPersistenceError {
    match classify(error) {
        DieselFailure::Connection(message) => SeedPersistenceError::connection(message),
        DieselFailure::UniqueViolation(_) | DieselFailure::Query(_) => {
            SeedPersistenceError::query(error.to_string())
        }
    }
}

#[async_trait]
impl SeedRepository for DieselSeedRepository {
    async fn apply(&self, catalog: &[SeedSchool]) -> Result<SeedOutcome, SeedPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let catalog = catalog.to_vec();

        conn.transaction(|conn| {
            async move {
                let mut outcome = SeedOutcome::default();

                for school in &catalog {
                    let new_school = NewSchoolRow {
                        id: Uuid::new_v4(),
                        name: &school.name,
                    };
                    outcome.schools_created += diesel::insert_into(schools::table)
                        .values(&new_school)
                        .on_conflict(schools::name)
                        .do_nothing()
                        .execute(conn)
                        .await?;

                    // The row may predate this run; resolve the id by name.
                    let school_id: Uuid = schools::table
                        .filter(schools::name.eq(&school.name))
                        .select(schools::id)
                        .first(conn)
                        .await?;

                    let player_rows: Vec<NewRealPlayerRow<'_>> = school
                        .players
                        .iter()
                        .map(|player| NewRealPlayerRow {
                            id: Uuid::new_v4(),
                            school_id,
                            name: &player.name,
                            role: player.role.code(),
                            value: player.value,
                        })
                        .collect();

                    outcome.players_created += diesel::insert_into(real_players::table)
                        .values(&player_rows)
                        .on_conflict((real_players::school_id, real_players::name))
                        .do_nothing()
                        .execute(conn)
                        .await?;
                }

                Ok(outcome)
            }
            .scope_boxed()
        })
        .await
        .map_err(|err: diesel::result::Error| map_diesel_error(&err))
    }
}
