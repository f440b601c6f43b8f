//! Domain ports: the traits adapters implement on either side of the core.
//!
//! Driven ports (repositories, hasher, mailer) are implemented by the
//! outbound layer. Driving ports (commands and queries) are implemented by
//! the domain services and consumed by HTTP handlers through trait objects.

pub mod catalog_query;
pub mod catalog_repository;
pub mod draft_command;
pub mod draft_repository;
pub mod email_change_command;
pub mod login_service;
pub mod mailer;
pub mod password_hasher;
pub mod profile_command;
pub mod profile_query;
pub mod seed_repository;
pub mod signup_command;
pub mod token_repository;
pub mod user_repository;

pub use catalog_query::CatalogQuery;
pub use catalog_repository::{CatalogPersistenceError, CatalogRepository};
pub use draft_command::DraftCommand;
pub use draft_repository::{DraftCommitError, DraftRepository, TeamCommit};
pub use email_change_command::EmailChangeCommand;
pub use login_service::LoginService;
pub use mailer::{EmailMessage, Mailer, MailerError};
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use profile_command::ProfileCommand;
pub use profile_query::ProfileQuery;
pub use seed_repository::{
    SeedOutcome, SeedPersistenceError, SeedPlayer, SeedRepository, SeedSchool,
};
pub use signup_command::SignupCommand;
pub use token_repository::{TokenPersistenceError, VerificationToken, VerificationTokenRepository};
pub use user_repository::{
    DraftStatus, NewUser, StoredCredentials, UserPersistenceError, UserRepository,
};

#[cfg(test)]
pub use catalog_query::MockCatalogQuery;
#[cfg(test)]
pub use catalog_repository::MockCatalogRepository;
#[cfg(test)]
pub use draft_command::MockDraftCommand;
#[cfg(test)]
pub use draft_repository::MockDraftRepository;
#[cfg(test)]
pub use email_change_command::MockEmailChangeCommand;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use mailer::MockMailer;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
#[cfg(test)]
pub use profile_command::MockProfileCommand;
#[cfg(test)]
pub use profile_query::MockProfileQuery;
#[cfg(test)]
pub use signup_command::MockSignupCommand;
#[cfg(test)]
pub use token_repository::MockVerificationTokenRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
