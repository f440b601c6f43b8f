//! PostgreSQL-backed `UserRepository` implementation using Diesel.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{
    DraftStatus, NewUser, StoredCredentials, UserPersistenceError, UserRepository,
};
use crate::domain::user::{EmailAddress, ProfileChanges, UserId, UserProfile};

use super::error_classify::{DieselFailure, classify};
use super::models::{NewUserRow, ProfileNamesUpdate, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{accounts, users};

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.to_string())
}

/// Map Diesel errors; unique violations on the users table can only be the
/// email key, so they surface as [`UserPersistenceError::DuplicateEmail`].
fn map_diesel_error(error: &diesel::result::Error) -> UserPersistenceError {
    match classify(error) {
        DieselFailure::Connection(message) => UserPersistenceError::connection(message),
        DieselFailure::UniqueViolation(_) => UserPersistenceError::DuplicateEmail,
        DieselFailure::Query(message) => UserPersistenceError::query(message),
    }
}

fn profile_from(row: UserRow, providers: &[String]) -> Result<UserProfile, UserPersistenceError> {
    let email = EmailAddress::new(&row.email)
        .map_err(|err| UserPersistenceError::query(format!("stored email invalid: {err}")))?;
    Ok(UserProfile {
        id: UserId::from_uuid(row.id),
        email,
        display_name: row.display_name,
        first_name: row.first_name,
        last_name: row.last_name,
        email_verified_at: row.email_verified_at,
        created_at: row.created_at,
        has_password: row.password_hash.is_some(),
        has_google_account: providers.iter().any(|p| p == "google"),
        budget: row.budget,
        has_team: row.has_team,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            id: *user.id.as_uuid(),
            email: user.email.as_ref(),
            password_hash: &user.password_hash,
            display_name: user.display_name.as_deref(),
            first_name: user.first_name.as_deref(),
            last_name: user.last_name.as_deref(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(&err))
    }

    async fn find_credentials_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<(Uuid, Option<String>)> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select((users::id, users::password_hash))
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(&err))?;

        Ok(row.map(|(id, password_hash)| StoredCredentials {
            user_id: UserId::from_uuid(id),
            password_hash,
        }))
    }

    async fn find_profile(
        &self,
        id: &UserId,
    ) -> Result<Option<UserProfile>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let user_uuid = *id.as_uuid();

        // Read the user row and its provider links in one transaction so
        // both SELECTs observe the same snapshot.
        let result: Option<(UserRow, Vec<String>)> = conn
            .transaction(|conn| {
                async move {
                    let row: Option<UserRow> = users::table
                        .filter(users::id.eq(user_uuid))
                        .select(UserRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;

                    let Some(row) = row else {
                        return Ok(None);
                    };

                    let providers: Vec<String> = accounts::table
                        .filter(accounts::user_id.eq(user_uuid))
                        .select(accounts::provider)
                        .load(conn)
                        .await?;

                    Ok(Some((row, providers)))
                }
                .scope_boxed()
            })
            .await
            .map_err(|err: diesel::result::Error| map_diesel_error(&err))?;

        result
            .map(|(row, providers)| profile_from(row, &providers))
            .transpose()
    }

    async fn draft_status(
        &self,
        id: &UserId,
    ) -> Result<Option<DraftStatus>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<(i32, bool)> = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select((users::budget, users::has_team))
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(&err))?;

        Ok(row.map(|(budget, has_team)| DraftStatus { budget, has_team }))
    }

    async fn apply_profile_changes(
        &self,
        id: &UserId,
        changes: &ProfileChanges,
    ) -> Result<Option<UserProfile>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let user_uuid = *id.as_uuid();
        let changes = changes.clone();

        let result: Option<(UserRow, Vec<String>)> = conn
            .transaction(|conn| {
                async move {
                    let current: Option<UserRow> = users::table
                        .filter(users::id.eq(user_uuid))
                        .select(UserRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;

                    let Some(current) = current else {
                        return Ok(None);
                    };

                    // Tri-state merge: untouched fields keep their stored
                    // value, provided fields replace it (possibly with NULL).
                    let display_name = changes
                        .display_name
                        .clone()
                        .unwrap_or(current.display_name);
                    let first_name = changes.first_name.clone().unwrap_or(current.first_name);
                    let last_name = changes.last_name.clone().unwrap_or(current.last_name);

                    let update = ProfileNamesUpdate {
                        display_name: display_name.as_deref(),
                        first_name: first_name.as_deref(),
                        last_name: last_name.as_deref(),
                    };
                    diesel::update(users::table.filter(users::id.eq(user_uuid)))
                        .set((&update, users::updated_at.eq(diesel::dsl::now)))
                        .execute(conn)
                        .await?;

                    let updated: UserRow = users::table
                        .filter(users::id.eq(user_uuid))
                        .select(UserRow::as_select())
                        .first(conn)
                        .await?;

                    let providers: Vec<String> = accounts::table
                        .filter(accounts::user_id.eq(user_uuid))
                        .select(accounts::provider)
                        .load(conn)
                        .await?;

                    Ok(Some((updated, providers)))
                }
                .scope_boxed()
            })
            .await
            .map_err(|err: diesel::result::Error| map_diesel_error(&err))?;

        result
            .map(|(row, providers)| profile_from(row, &providers))
            .transpose()
    }

    async fn set_password_hash(
        &self,
        id: &UserId,
        password_hash: &str,
    ) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(users::table.filter(users::id.eq(id.as_uuid())))
            .set((
                users::password_hash.eq(Some(password_hash)),
                users::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err))?;

        if updated == 0 {
            return Err(UserPersistenceError::query("user not found"));
        }
        Ok(())
    }

    async fn email_owner(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserId>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id: Option<Uuid> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(users::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(&err))?;

        Ok(id.map(UserId::from_uuid))
    }

    async fn apply_email_change(
        &self,
        id: &UserId,
        email: &EmailAddress,
    ) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(users::table.filter(users::id.eq(id.as_uuid())))
            .set((
                users::email.eq(email.as_ref()),
                users::email_verified_at.eq(Some(Utc::now())),
                users::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err))?;

        if updated == 0 {
            return Err(UserPersistenceError::query("user not found"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Error mapping and row conversion coverage.
    use super::*;
    use chrono::Utc;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    fn row() -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            email: "user@example.com".to_owned(),
            password_hash: Some("$2b$12$hash".to_owned()),
            display_name: None,
            first_name: None,
            last_name: None,
            email_verified_at: None,
            budget: 100,
            has_team: false,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(err, UserPersistenceError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn unique_violation_maps_to_duplicate_email() {
        let diesel_err = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_owned()),
        );
        assert_eq!(
            map_diesel_error(&diesel_err),
            UserPersistenceError::DuplicateEmail
        );
    }

    #[rstest]
    fn profile_derives_flags_from_hash_and_providers() {
        let profile =
            profile_from(row(), &["google".to_owned()]).expect("profile converts");
        assert!(profile.has_password);
        assert!(profile.has_google_account);

        let mut no_hash = row();
        no_hash.password_hash = None;
        let profile = profile_from(no_hash, &[]).expect("profile converts");
        assert!(!profile.has_password);
        assert!(!profile.has_google_account);
    }
}
