//! Signup service: create a credential-backed account.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::auth::Password;
use crate::domain::error::Error;
use crate::domain::ports::{
    NewUser, PasswordHashError, PasswordHasher, SignupCommand, UserPersistenceError,
    UserRepository,
};
use crate::domain::user::{EmailAddress, PERSON_NAME_MAX, UserId, normalize_name};

/// A validated signup request.
#[derive(Debug, Clone)]
pub struct SignupRequest {
    /// Normalised email address.
    pub email: EmailAddress,
    /// Policy-checked password.
    pub password: Password,
    /// Optional given name.
    pub first_name: Option<String>,
    /// Optional family name.
    pub last_name: Option<String>,
}

impl SignupRequest {
    /// Build a request from raw payload fields, normalising the name parts.
    #[must_use]
    pub fn new(
        email: EmailAddress,
        password: Password,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Self {
        Self {
            email,
            password,
            first_name: first_name.and_then(|v| normalize_name(v, PERSON_NAME_MAX)),
            last_name: last_name.and_then(|v| normalize_name(v, PERSON_NAME_MAX)),
        }
    }

    /// Default display name: the name parts joined, or nothing when both are
    /// absent.
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        let joined = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        if joined.is_empty() { None } else { Some(joined) }
    }
}

/// Signup workflow over the user repository and the hashing primitive.
#[derive(Clone)]
pub struct SignupService<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> SignupService<R, H> {
    /// Create a new service over the given ports.
    pub const fn new(users: Arc<R>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(format!("password hashing failed: {error}"))
}

/// Fails with `conflict` when the email is already registered; storage
/// failures map to `service_unavailable`/`internal_error`.
#[async_trait]
impl<R, H> SignupCommand for SignupService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn signup(&self, request: SignupRequest) -> Result<UserId, Error> {
        let password_hash = self
            .hasher
            .hash(&request.password)
            .await
            .map_err(map_hash_error)?;

        let user = NewUser {
            id: UserId::random(),
            email: request.email.clone(),
            password_hash,
            display_name: request.display_name(),
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
        };

        match self.users.insert(&user).await {
            Ok(()) => Ok(user.id),
            Err(UserPersistenceError::DuplicateEmail) => {
                Err(Error::conflict("email already in use")
                    .with_details(json!({ "field": "email" })))
            }
            Err(UserPersistenceError::Connection { message }) => Err(Error::service_unavailable(
                format!("user repository unavailable: {message}"),
            )),
            Err(other) => Err(Error::internal(format!("user repository error: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockPasswordHasher, MockUserRepository};
    use rstest::rstest;

    fn request(first: Option<&str>, last: Option<&str>) -> SignupRequest {
        SignupRequest::new(
            EmailAddress::new("new@example.com").expect("valid email"),
            Password::new("Passw0rd!").expect("strong password"),
            first,
            last,
        )
    }

    fn hashing_ok() -> MockPasswordHasher {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .times(1)
            .return_once(|_| Ok("$2b$12$hash".to_owned()));
        hasher
    }

    #[rstest]
    #[case(Some("Ada"), Some("Lovelace"), Some("Ada Lovelace"))]
    #[case(Some("Ada"), None, Some("Ada"))]
    #[case(None, Some("Lovelace"), Some("Lovelace"))]
    #[case(None, None, None)]
    #[case(Some("   "), None, None)]
    fn display_name_joins_present_parts(
        #[case] first: Option<&str>,
        #[case] last: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(request(first, last).display_name().as_deref(), expected);
    }

    #[tokio::test]
    async fn signup_stores_hash_and_names() {
        let mut users = MockUserRepository::new();
        users
            .expect_insert()
            .withf(|user: &NewUser| {
                user.email.as_ref() == "new@example.com"
                    && user.password_hash == "$2b$12$hash"
                    && user.display_name.as_deref() == Some("Ada Lovelace")
                    && user.first_name.as_deref() == Some("Ada")
            })
            .times(1)
            .return_once(|_| Ok(()));

        SignupService::new(Arc::new(users), Arc::new(hashing_ok()))
            .signup(request(Some("Ada"), Some("Lovelace")))
            .await
            .expect("signup succeeds");
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let mut users = MockUserRepository::new();
        users
            .expect_insert()
            .times(1)
            .return_once(|_| Err(UserPersistenceError::DuplicateEmail));

        let err = SignupService::new(Arc::new(users), Arc::new(hashing_ok()))
            .signup(request(None, None))
            .await
            .expect_err("duplicate rejected");
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.message, "email already in use");
    }

    #[tokio::test]
    async fn hashing_failure_never_reaches_the_repository() {
        let mut users = MockUserRepository::new();
        users.expect_insert().times(0);
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .times(1)
            .return_once(|_| Err(PasswordHashError::primitive("cost out of range")));

        let err = SignupService::new(Arc::new(users), Arc::new(hasher))
            .signup(request(None, None))
            .await
            .expect_err("hash failure surfaces");
        assert_eq!(err.code, ErrorCode::InternalError);
    }
}
