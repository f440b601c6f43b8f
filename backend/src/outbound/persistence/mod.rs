//! Diesel adapters over PostgreSQL implementing the persistence ports.

mod diesel_catalog_repository;
mod diesel_draft_repository;
mod diesel_seed_repository;
mod diesel_token_repository;
mod diesel_user_repository;
mod error_classify;
mod migrate;
mod models;
mod pool;
mod schema;

pub use diesel_catalog_repository::DieselCatalogRepository;
pub use diesel_draft_repository::DieselDraftRepository;
pub use diesel_seed_repository::DieselSeedRepository;
pub use diesel_token_repository::DieselTokenRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrate::{MigrateError, run_pending};
pub use pool::{DbPool, PoolError, PoolSettings};
