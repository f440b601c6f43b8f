//! Embedded schema migrations, applied at process start.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Errors raised while applying migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    /// Could not open the synchronous migration connection.
    #[error("migration connection failed: {message}")]
    Connection {
        /// Driver diagnostic.
        message: String,
    },
    /// A migration failed to apply.
    #[error("migration failed: {message}")]
    Apply {
        /// Harness diagnostic.
        message: String,
    },
}

/// Apply all pending migrations.
///
/// Diesel's migration harness is synchronous, so this runs on the blocking
/// pool with a dedicated short-lived connection.
pub async fn run_pending(database_url: &str) -> Result<(), MigrateError> {
    let database_url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || {
        let mut conn =
            PgConnection::establish(&database_url).map_err(|err| MigrateError::Connection {
                message: err.to_string(),
            })?;
        conn.run_pending_migrations(MIGRATIONS)
            .map(|versions| versions.len())
            .map_err(|err| MigrateError::Apply {
                message: err.to_string(),
            })
    })
    .await
    .map_err(|err| MigrateError::Apply {
        message: format!("migration task panicked: {err}"),
    })??;

    info!(applied, "database migrations up to date");
    Ok(())
}
