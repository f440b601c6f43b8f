//! Profile read/update and password change.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::auth::Password;
use crate::domain::error::Error;
use crate::domain::ports::{
    PasswordHashError, PasswordHasher, ProfileCommand, ProfileQuery, UserPersistenceError,
    UserRepository,
};
use crate::domain::user::{DEFAULT_BUDGET, ProfileChanges, UserId, UserProfile};

/// Profile workflows for the authenticated user.
#[derive(Clone)]
pub struct ProfileService<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> ProfileService<R, H> {
    /// Create a new service over the given ports.
    pub const fn new(users: Arc<R>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        other => Error::internal(format!("user repository error: {other}")),
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(format!("password hashing failed: {error}"))
}

/// Profile fetch fails with `not_found` when the session references a
/// deleted user; the budget read mirrors the original contract and falls
/// back to the default in that case.
#[async_trait]
impl<R, H> ProfileQuery for ProfileService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn fetch_profile(&self, user_id: UserId) -> Result<UserProfile, Error> {
        self.users
            .find_profile(&user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("user not found"))
    }

    async fn fetch_budget(&self, user_id: UserId) -> Result<i32, Error> {
        let status = self
            .users
            .draft_status(&user_id)
            .await
            .map_err(map_user_error)?;
        Ok(status.map_or(DEFAULT_BUDGET, |s| s.budget))
    }
}

/// An update providing no field at all fails with `invalid_request`.
#[async_trait]
impl<R, H> ProfileCommand for ProfileService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn update_profile(
        &self,
        user_id: UserId,
        changes: ProfileChanges,
    ) -> Result<UserProfile, Error> {
        if changes.is_empty() {
            return Err(Error::invalid_request("no fields to update"));
        }
        self.users
            .apply_profile_changes(&user_id, &changes)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("user not found"))
    }

    async fn change_password(&self, user_id: UserId, password: Password) -> Result<(), Error> {
        let hash = self.hasher.hash(&password).await.map_err(map_hash_error)?;
        self.users
            .set_password_hash(&user_id, &hash)
            .await
            .map_err(map_user_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockPasswordHasher, MockUserRepository};
    use crate::domain::user::EmailAddress;
    use chrono::Utc;

    fn profile(user_id: UserId) -> UserProfile {
        UserProfile {
            id: user_id,
            email: EmailAddress::new("user@example.com").expect("valid email"),
            display_name: Some("Ada Lovelace".to_owned()),
            first_name: Some("Ada".to_owned()),
            last_name: Some("Lovelace".to_owned()),
            email_verified_at: None,
            created_at: Utc::now(),
            has_password: true,
            has_google_account: false,
            budget: 100,
            has_team: false,
        }
    }

    fn service(
        users: MockUserRepository,
        hasher: MockPasswordHasher,
    ) -> ProfileService<MockUserRepository, MockPasswordHasher> {
        ProfileService::new(Arc::new(users), Arc::new(hasher))
    }

    #[tokio::test]
    async fn fetch_returns_the_profile() {
        let user_id = UserId::random();
        let expected = profile(user_id);
        let returned = expected.clone();
        let mut users = MockUserRepository::new();
        users
            .expect_find_profile()
            .times(1)
            .return_once(move |_| Ok(Some(returned)));

        let fetched = service(users, MockPasswordHasher::new())
            .fetch_profile(user_id)
            .await
            .expect("profile fetched");
        assert_eq!(fetched, expected);
    }

    #[tokio::test]
    async fn fetch_of_deleted_user_is_not_found() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_profile()
            .times(1)
            .return_once(|_| Ok(None));

        let err = service(users, MockPasswordHasher::new())
            .fetch_profile(UserId::random())
            .await
            .expect_err("deleted user rejected");
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn budget_reads_the_current_value() {
        let mut users = MockUserRepository::new();
        users.expect_draft_status().times(1).return_once(|_| {
            Ok(Some(crate::domain::ports::DraftStatus {
                budget: 37,
                has_team: true,
            }))
        });

        let budget = service(users, MockPasswordHasher::new())
            .fetch_budget(UserId::random())
            .await
            .expect("budget fetched");
        assert_eq!(budget, 37);
    }

    #[tokio::test]
    async fn budget_defaults_when_the_record_is_absent() {
        let mut users = MockUserRepository::new();
        users
            .expect_draft_status()
            .times(1)
            .return_once(|_| Ok(None));

        let budget = service(users, MockPasswordHasher::new())
            .fetch_budget(UserId::random())
            .await
            .expect("budget fetched");
        assert_eq!(budget, DEFAULT_BUDGET);
    }

    #[tokio::test]
    async fn empty_update_is_rejected_without_touching_storage() {
        let mut users = MockUserRepository::new();
        users.expect_apply_profile_changes().times(0);

        let err = service(users, MockPasswordHasher::new())
            .update_profile(UserId::random(), ProfileChanges::default())
            .await
            .expect_err("empty update rejected");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
        assert_eq!(err.message, "no fields to update");
    }

    #[tokio::test]
    async fn update_applies_changes() {
        let user_id = UserId::random();
        let updated = profile(user_id);
        let returned = updated.clone();
        let mut users = MockUserRepository::new();
        users
            .expect_apply_profile_changes()
            .withf(|_, changes: &ProfileChanges| changes.display_name == Some(None))
            .times(1)
            .return_once(move |_, _| Ok(Some(returned)));

        let changes = ProfileChanges::from_fields(Some("   "), None, None);
        let result = service(users, MockPasswordHasher::new())
            .update_profile(user_id, changes)
            .await
            .expect("update succeeds");
        assert_eq!(result, updated);
    }

    #[tokio::test]
    async fn change_password_stores_the_new_hash() {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .times(1)
            .return_once(|_| Ok("$2b$12$fresh".to_owned()));
        let mut users = MockUserRepository::new();
        users
            .expect_set_password_hash()
            .withf(|_, hash| hash == "$2b$12$fresh")
            .times(1)
            .return_once(|_, _| Ok(()));

        service(users, hasher)
            .change_password(
                UserId::random(),
                Password::new("Passw0rd!").expect("strong password"),
            )
            .await
            .expect("password change succeeds");
    }
}
