//! PostgreSQL-backed `DraftRepository` implementation using Diesel.
//!
//! The commit is one transaction: team row, fifteen roster links, and the
//! owner's flag/budget update either all land or none do. The unique index
//! on `fantasy_teams.user_id` is what closes the check-then-act race on the
//! single-team rule: a second concurrent submission fails right here and is
//! reported as [`DraftCommitError::AlreadyHasTeam`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{DraftCommitError, DraftRepository, TeamCommit};

use super::error_classify::{DieselFailure, classify};
use super::models::{NewFantasyTeamRow, NewRosterLinkRow};
use super::pool::{DbPool, PoolError};
use super::schema::{fantasy_team_players, fantasy_teams, users};

/// Diesel-backed implementation of the `DraftRepository` port.
#[derive(Clone)]
pub struct DieselDraftRepository {
    pool: DbPool,
}

impl DieselDraftRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DraftCommitError {
    DraftCommitError::connection(error.to_string())
}

fn map_diesel_error(error: &diesel::result::Error) -> DraftCommitError {
    match classify(error) {
        DieselFailure::UniqueViolation(_) => DraftCommitError::AlreadyHasTeam,
        DieselFailure::Connection(message) => DraftCommitError::connection(message),
        DieselFailure::Query(message) => DraftCommitError::query(message),
    }
}

#[async_trait]
impl DraftRepository for DieselDraftRepository {
    async fn commit_team(&self, commit: &TeamCommit) -> Result<(), DraftCommitError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let team_row = NewFantasyTeamRow {
            id: commit.team_id,
            user_id: *commit.user_id.as_uuid(),
            name: commit.name.as_ref(),
        };
        let link_rows: Vec<NewRosterLinkRow> = commit
            .player_ids
            .iter()
            .map(|player_id| NewRosterLinkRow {
                team_id: commit.team_id,
                real_player_id: *player_id,
            })
            .collect();
        let owner = *commit.user_id.as_uuid();
        let total_cost = commit.total_cost;

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(fantasy_teams::table)
                    .values(&team_row)
                    .execute(conn)
                    .await?;

                diesel::insert_into(fantasy_team_players::table)
                    .values(&link_rows)
                    .execute(conn)
                    .await?;

                diesel::update(users::table.filter(users::id.eq(owner)))
                    .set((
                        users::has_team.eq(true),
                        users::budget.eq(users::budget - total_cost),
                        users::updated_at.eq(diesel::dsl::now),
                    ))
                    .execute(conn)
                    .await?;

                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err: diesel::result::Error| map_diesel_error(&err))
    }
}
