//! Wire port implementations into the HTTP state.
//!
//! With a database pool the Diesel adapters back every port; without one the
//! shared [`MemoryStore`] does, which keeps local development working
//! without PostgreSQL.

use std::sync::Arc;

use backend::domain::ports::{
    CatalogRepository, DraftRepository, Mailer, SeedRepository, UserRepository,
    VerificationTokenRepository,
};
use backend::domain::{
    CatalogService, DraftService, EmailChangeService, PasswordLoginService, ProfileService,
    SignupService,
};
use backend::inbound::http::state::HttpState;
use backend::outbound::hashing::BcryptPasswordHasher;
use backend::outbound::memory::MemoryStore;
use backend::outbound::persistence::{
    DbPool, DieselCatalogRepository, DieselDraftRepository, DieselSeedRepository,
    DieselTokenRepository, DieselUserRepository,
};

/// The assembled port bundle plus the seeder matching the chosen backend.
pub struct BuiltState {
    /// Handler dependencies.
    pub http: HttpState,
    /// Seed repository over the same backend.
    pub seeder: Arc<dyn SeedRepository>,
}

fn assemble<U, C, D, T>(
    users: Arc<U>,
    catalog: Arc<C>,
    drafts: Arc<D>,
    tokens: Arc<T>,
    mailer: Arc<dyn Mailer>,
    public_base_url: String,
) -> HttpState
where
    U: UserRepository + 'static,
    C: CatalogRepository + 'static,
    D: DraftRepository + 'static,
    T: VerificationTokenRepository + 'static,
{
    let hasher = Arc::new(BcryptPasswordHasher);

    HttpState {
        login: Arc::new(PasswordLoginService::new(users.clone(), hasher.clone())),
        signup: Arc::new(SignupService::new(users.clone(), hasher.clone())),
        profile_query: Arc::new(ProfileService::new(users.clone(), hasher.clone())),
        profile_command: Arc::new(ProfileService::new(users.clone(), hasher)),
        email_change: Arc::new(EmailChangeService::new(
            users.clone(),
            tokens,
            mailer,
            public_base_url,
        )),
        catalog: Arc::new(CatalogService::new(catalog.clone())),
        draft: Arc::new(DraftService::new(users, catalog, drafts)),
    }
}

/// Build the HTTP state over the database pool, or over the in-memory store
/// when none is configured.
pub fn build_state(
    db_pool: Option<&DbPool>,
    mailer: Arc<dyn Mailer>,
    public_base_url: String,
) -> BuiltState {
    match db_pool {
        Some(pool) => BuiltState {
            http: assemble(
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselCatalogRepository::new(pool.clone())),
                Arc::new(DieselDraftRepository::new(pool.clone())),
                Arc::new(DieselTokenRepository::new(pool.clone())),
                mailer,
                public_base_url,
            ),
            seeder: Arc::new(DieselSeedRepository::new(pool.clone())),
        },
        None => {
            let store = Arc::new(MemoryStore::new());
            BuiltState {
                http: assemble(
                    store.clone(),
                    store.clone(),
                    store.clone(),
                    store.clone(),
                    mailer,
                    public_base_url,
                ),
                seeder: store,
            }
        }
    }
}
