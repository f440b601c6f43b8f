//! Domain layer: value types, services, and ports.
//!
//! Everything here is transport agnostic. Inbound adapters parse payloads
//! into these types before calling a service; outbound adapters implement
//! the ports in [`ports`].

pub mod auth;
pub mod catalog;
pub mod draft;
pub mod email_change;
pub mod error;
pub mod login;
pub mod ports;
pub mod profile;
pub mod roster;
pub mod signup;
pub mod team;
pub mod user;

pub use self::auth::{Credentials, CredentialsValidationError, Password, PasswordValidationError};
pub use self::catalog::CatalogService;
pub use self::draft::DraftService;
pub use self::email_change::EmailChangeService;
pub use self::error::{Error, ErrorCode, REQUEST_ID_HEADER};
pub use self::login::PasswordLoginService;
pub use self::profile::ProfileService;
pub use self::roster::{CatalogPlayer, DraftPick, ROLES, ROSTER_SIZE, Role};
pub use self::signup::{SignupRequest, SignupService};
pub use self::team::{TEAM_NAME_MAX, TEAM_NAME_MIN, TeamName, TeamNameError};
pub use self::user::{
    DEFAULT_BUDGET, EmailAddress, ProfileChanges, UserId, UserProfile, UserValidationError,
    normalize_name,
};

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;
