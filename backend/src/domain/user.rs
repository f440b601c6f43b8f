//! User identity and profile value types.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors raised by the user value types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Email does not look like `local@domain.tld`.
    InvalidEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email format is invalid"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalised email address.
///
/// ## Invariants
/// - Trimmed and lowercased on construction.
/// - Shaped like `local@domain.tld`: exactly one `@`, no whitespace, and a
///   dot-separated domain with non-empty segments.
///
/// The shape check is deliberately permissive; deliverability is the mail
/// service's problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`], normalising case.
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalized = input.as_ref().trim().to_lowercase();
        if normalized.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !Self::looks_like_address(&normalized) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalized))
    }

    fn looks_like_address(candidate: &str) -> bool {
        if candidate.chars().any(char::is_whitespace) {
            return false;
        }
        let mut parts = candidate.splitn(2, '@');
        let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
            return false;
        };
        if local.is_empty() || domain.contains('@') {
            return false;
        }
        match domain.rsplit_once('.') {
            Some((head, tld)) => !head.is_empty() && !tld.is_empty(),
            None => false,
        }
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Starting draft budget, in credits.
pub const DEFAULT_BUDGET: i32 = 100;

/// Maximum stored length for the free-form display name.
pub const DISPLAY_NAME_MAX: usize = 100;
/// Maximum stored length for first and last names.
pub const PERSON_NAME_MAX: usize = 50;

/// Normalise a profile name field: trim, clear when empty, cap the length.
///
/// Returns `None` when the trimmed input is empty, mirroring the profile
/// endpoint contract where an empty submission clears the field.
#[must_use]
pub fn normalize_name(input: &str, max: usize) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(max).collect())
}

/// Profile read model returned by the `/me` surface.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    /// Stable identifier.
    pub id: UserId,
    /// Normalised email address.
    pub email: EmailAddress,
    /// Free-form display name, when set.
    pub display_name: Option<String>,
    /// Given name, when set.
    pub first_name: Option<String>,
    /// Family name, when set.
    pub last_name: Option<String>,
    /// When the email address was verified, if ever.
    pub email_verified_at: Option<DateTime<Utc>>,
    /// Account creation instant.
    pub created_at: DateTime<Utc>,
    /// Whether a password hash is on record; the hash itself never leaves
    /// the persistence layer.
    pub has_password: bool,
    /// Whether a Google federated account is linked.
    pub has_google_account: bool,
    /// Remaining draft budget in credits.
    pub budget: i32,
    /// Whether the user has already drafted their team.
    pub has_team: bool,
}

/// Requested profile field changes.
///
/// Each field is tri-state: absent (leave untouched), `Some(None)` (clear),
/// or `Some(Some(value))` (set to the normalised value).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    /// Display name change, if requested.
    pub display_name: Option<Option<String>>,
    /// First name change, if requested.
    pub first_name: Option<Option<String>>,
    /// Last name change, if requested.
    pub last_name: Option<Option<String>>,
}

impl ProfileChanges {
    /// Build changes from raw payload fields, normalising each provided value.
    #[must_use]
    pub fn from_fields(
        display_name: Option<&str>,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Self {
        Self {
            display_name: display_name.map(|v| normalize_name(v, DISPLAY_NAME_MAX)),
            first_name: first_name.map(|v| normalize_name(v, PERSON_NAME_MAX)),
            last_name: last_name.map(|v| normalize_name(v, PERSON_NAME_MAX)),
        }
    }

    /// True when no field change was requested at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.first_name.is_none() && self.last_name.is_none()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("user@example.com", "user@example.com")]
    #[case("  USER@Example.COM  ", "user@example.com")]
    #[case("a.b+c@mail.co.uk", "a.b+c@mail.co.uk")]
    fn valid_emails_normalise(#[case] input: &str, #[case] expected: &str) {
        let email = EmailAddress::new(input).expect("valid email");
        assert_eq!(email.as_ref(), expected);
    }

    #[rstest]
    #[case("", UserValidationError::EmptyEmail)]
    #[case("   ", UserValidationError::EmptyEmail)]
    #[case("plain", UserValidationError::InvalidEmail)]
    #[case("no@dot", UserValidationError::InvalidEmail)]
    #[case("two@@example.com", UserValidationError::InvalidEmail)]
    #[case("@example.com", UserValidationError::InvalidEmail)]
    #[case("user@.com", UserValidationError::InvalidEmail)]
    #[case("user@domain.", UserValidationError::InvalidEmail)]
    #[case("sp ace@example.com", UserValidationError::InvalidEmail)]
    fn invalid_emails_fail(#[case] input: &str, #[case] expected: UserValidationError) {
        let err = EmailAddress::new(input).expect_err("invalid email must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  Ada  ", Some("Ada"))]
    #[case("", None)]
    #[case("   ", None)]
    fn normalize_name_trims_and_clears(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(normalize_name(input, 50).as_deref(), expected);
    }

    #[test]
    fn normalize_name_caps_length() {
        let long = "x".repeat(80);
        let capped = normalize_name(&long, 50).expect("non-empty");
        assert_eq!(capped.chars().count(), 50);
    }

    #[test]
    fn profile_changes_track_which_fields_were_provided() {
        let changes = ProfileChanges::from_fields(Some("  "), None, Some("Lovelace"));
        assert_eq!(changes.display_name, Some(None));
        assert_eq!(changes.first_name, None);
        assert_eq!(changes.last_name, Some(Some("Lovelace".to_owned())));
        assert!(!changes.is_empty());
        assert!(ProfileChanges::default().is_empty());
    }
}
