//! PostgreSQL-backed `VerificationTokenRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    TokenPersistenceError, VerificationToken, VerificationTokenRepository,
};

use super::error_classify::{DieselFailure, classify};
use super::models::{NewVerificationTokenRow, VerificationTokenRow};
use super::pool::{DbPool, PoolError};
use super::schema::verification_tokens;

/// Diesel-backed implementation of the `VerificationTokenRepository` port.
#[derive(Clone)]
pub struct DieselTokenRepository {
    pool: DbPool,
}

impl DieselTokenRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TokenPersistenceError {
    TokenPersistenceError::connection(error.to_string())
}

fn map_diesel_error(error: &diesel::result::Error) -> TokenPersistenceError {
    match classify(error) {
        DieselFailure::Connection(message) => TokenPersistenceError::connection(message),
        DieselFailure::UniqueViolation(_) | DieselFailure::Query(_) => {
            TokenPersistenceError::query(error.to_string())
        }
    }
}

/// Identifier prefixes are fixed application strings without LIKE
/// metacharacters, so plain concatenation is safe here.
fn prefix_pattern(identifier_prefix: &str) -> String {
    format!("{identifier_prefix}%")
}

#[async_trait]
impl VerificationTokenRepository for DieselTokenRepository {
    async fn put(&self, record: &VerificationToken) -> Result<(), TokenPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewVerificationTokenRow {
            identifier: &record.identifier,
            token: &record.token,
            expires_at: record.expires_at,
        };

        diesel::insert_into(verification_tokens::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(&err))
    }

    async fn find_by_prefix(
        &self,
        identifier_prefix: &str,
        token: &str,
    ) -> Result<Option<VerificationToken>, TokenPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<VerificationTokenRow> = verification_tokens::table
            .filter(verification_tokens::token.eq(token))
            .filter(verification_tokens::identifier.like(prefix_pattern(identifier_prefix)))
            .select(VerificationTokenRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(&err))?;

        Ok(row.map(|row| VerificationToken {
            identifier: row.identifier,
            token: row.token,
            expires_at: row.expires_at,
        }))
    }

    async fn delete_by_prefix(
        &self,
        identifier_prefix: &str,
    ) -> Result<(), TokenPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(
            verification_tokens::table
                .filter(verification_tokens::identifier.like(prefix_pattern(identifier_prefix))),
        )
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(|err| map_diesel_error(&err))
    }
}
