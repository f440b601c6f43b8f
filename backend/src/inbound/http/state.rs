//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports (use cases) and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CatalogQuery, DraftCommand, EmailChangeCommand, LoginService, ProfileCommand, ProfileQuery,
    SignupCommand,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Credential authentication.
    pub login: Arc<dyn LoginService>,
    /// Account creation.
    pub signup: Arc<dyn SignupCommand>,
    /// Profile and budget reads.
    pub profile_query: Arc<dyn ProfileQuery>,
    /// Profile mutations and password change.
    pub profile_command: Arc<dyn ProfileCommand>,
    /// Two-step email change.
    pub email_change: Arc<dyn EmailChangeCommand>,
    /// Roster catalog read model.
    pub catalog: Arc<dyn CatalogQuery>,
    /// Draft validation and commit.
    pub draft: Arc<dyn DraftCommand>,
}
