//! Email change request and confirmation.
//!
//! Changing the address is a two-step flow: the user requests the change and
//! receives a verification link at the new address; following the link
//! applies the change and marks the address verified. The pending request is
//! a [`VerificationToken`] whose identifier encodes the operation:
//! `email-change:<user_id>:<new_email>`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::ports::EmailChangeCommand;
use crate::domain::ports::{
    EmailMessage, Mailer, TokenPersistenceError, UserPersistenceError, UserRepository,
    VerificationToken, VerificationTokenRepository,
};
use crate::domain::user::{EmailAddress, UserId};

const IDENTIFIER_PREFIX: &str = "email-change:";
const TOKEN_BYTES: usize = 32;
const TOKEN_TTL_HOURS: i64 = 24;
const DEAD_TOKEN: &str = "invalid or expired verification token";

/// Email change workflows.
#[derive(Clone)]
pub struct EmailChangeService<R, T, M: ?Sized> {
    users: Arc<R>,
    tokens: Arc<T>,
    mailer: Arc<M>,
    /// Base URL the verification link points at.
    public_base_url: String,
}

impl<R, T, M: ?Sized> EmailChangeService<R, T, M> {
    /// Create a new service over the given ports.
    pub fn new(users: Arc<R>, tokens: Arc<T>, mailer: Arc<M>, public_base_url: String) -> Self {
        Self {
            users,
            tokens,
            mailer,
            public_base_url,
        }
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

fn map_token_error(error: TokenPersistenceError) -> Error {
    match error {
        TokenPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("token repository unavailable: {message}"))
        }
        TokenPersistenceError::Query { message } => {
            Error::internal(format!("token repository error: {message}"))
        }
    }
}

fn user_prefix(user_id: UserId) -> String {
    format!("{IDENTIFIER_PREFIX}{user_id}:")
}

fn fresh_token() -> String {
    hex::encode(rand::random::<[u8; TOKEN_BYTES]>())
}

/// Split a pending-change identifier back into the user id and new address.
fn parse_identifier(identifier: &str) -> Option<(UserId, EmailAddress)> {
    let rest = identifier.strip_prefix(IDENTIFIER_PREFIX)?;
    // The email keeps any further colons; only the first separates the id.
    let (raw_id, raw_email) = rest.split_once(':')?;
    let id = raw_id.parse::<Uuid>().ok().map(UserId::from_uuid)?;
    let email = EmailAddress::new(raw_email).ok()?;
    Some((id, email))
}

/// Requesting a change fails with `invalid_request` when the new address
/// equals the current one or belongs to another account, and with
/// `service_unavailable` when the verification mail cannot be handed to the
/// mail service (the stored token is cleaned up in that case). Any previous
/// pending change for the user is discarded first, so at most one change is
/// in flight per user.
///
/// Confirmation treats unknown, malformed, and expired tokens identically;
/// a concurrent claim of the address surfaces as `conflict`.
#[async_trait]
impl<R, T, M> EmailChangeCommand for EmailChangeService<R, T, M>
where
    R: UserRepository,
    T: VerificationTokenRepository,
    M: Mailer + ?Sized,
{
    async fn request_change(&self, user_id: UserId, new_email: EmailAddress) -> Result<(), Error> {
        let profile = self
            .users
            .find_profile(&user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("user not found"))?;

        if profile.email == new_email {
            return Err(Error::invalid_request(
                "the new email is the same as the current one",
            ));
        }

        if let Some(owner) = self
            .users
            .email_owner(&new_email)
            .await
            .map_err(map_user_error)?
            && owner != user_id
        {
            return Err(Error::invalid_request(
                "this email is already used by another account",
            ));
        }

        let prefix = user_prefix(user_id);
        self.tokens
            .delete_by_prefix(&prefix)
            .await
            .map_err(map_token_error)?;

        let record = VerificationToken {
            identifier: format!("{prefix}{new_email}"),
            token: fresh_token(),
            expires_at: Utc::now() + Duration::hours(TOKEN_TTL_HOURS),
        };
        self.tokens.put(&record).await.map_err(map_token_error)?;

        let message = EmailMessage {
            to: new_email,
            subject: "Confirm your new email address".to_owned(),
            body: format!(
                "Follow this link to confirm your new address: \
                 {base}/api/v1/me/email/verify?token={token}\n\
                 The link expires in {TOKEN_TTL_HOURS} hours.",
                base = self.public_base_url,
                token = record.token,
            ),
        };
        if let Err(error) = self.mailer.send(&message).await {
            // Without the mail the token is unreachable; drop it again.
            self.tokens
                .delete_by_prefix(&prefix)
                .await
                .map_err(map_token_error)?;
            return Err(Error::service_unavailable(format!(
                "verification email could not be sent: {error}"
            )));
        }

        Ok(())
    }

    async fn confirm_change(&self, token: &str) -> Result<(), Error> {
        let record = self
            .tokens
            .find_by_prefix(IDENTIFIER_PREFIX, token)
            .await
            .map_err(map_token_error)?
            .ok_or_else(|| Error::invalid_request(DEAD_TOKEN))?;

        let Some((user_id, new_email)) = parse_identifier(&record.identifier) else {
            return Err(Error::internal("malformed verification token identifier"));
        };
        let prefix = user_prefix(user_id);

        if record.expires_at < Utc::now() {
            self.tokens
                .delete_by_prefix(&prefix)
                .await
                .map_err(map_token_error)?;
            return Err(Error::invalid_request(DEAD_TOKEN));
        }

        match self.users.apply_email_change(&user_id, &new_email).await {
            Ok(()) => {}
            Err(UserPersistenceError::DuplicateEmail) => {
                self.tokens
                    .delete_by_prefix(&prefix)
                    .await
                    .map_err(map_token_error)?;
                return Err(Error::conflict(
                    "this email is already used by another account",
                ));
            }
            Err(other) => return Err(map_user_error(other)),
        }

        self.tokens
            .delete_by_prefix(&prefix)
            .await
            .map_err(map_token_error)?;
        Ok(())
    }
}
