//! Backend entry point: configuration, persistence, seeding, HTTP server.

mod server;

use std::env;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::domain::ports::Mailer;
use backend::inbound::http::health::HealthState;
use backend::outbound::email::{LogMailer, MailerSettings, ResendMailer};
use backend::outbound::persistence::{DbPool, PoolSettings, run_pending};
use server::{AppSettings, ServerConfig, build_state, create_server};

fn load_session_key(settings: &AppSettings) -> std::io::Result<Key> {
    let key_path = settings.session_key_file();
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            if cfg!(debug_assertions) || settings.session_allow_ephemeral {
                warn!(path = %key_path.display(), error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {}: {e}",
                    key_path.display()
                )))
            }
        }
    }
}

fn build_mailer(settings: &AppSettings) -> Arc<dyn Mailer> {
    match (&settings.mail_api_key, &settings.mail_from) {
        (Some(api_key), Some(from)) => Arc::new(ResendMailer::new(MailerSettings::new(
            api_key.as_str(),
            from.as_str(),
        ))),
        _ => {
            warn!("mail API key or sender missing; logging outbound mail instead");
            Arc::new(LogMailer)
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(env::args_os())
        .map_err(|e| std::io::Error::other(format!("configuration error: {e}")))?;

    let key = load_session_key(&settings)?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| std::io::Error::other(format!("invalid bind address: {e}")))?;

    let db_pool = match &settings.database_url {
        Some(url) => {
            run_pending(url)
                .await
                .map_err(|e| std::io::Error::other(format!("migrations failed: {e}")))?;
            let mut pool_settings = PoolSettings::new(url);
            if let Some(max_size) = settings.pool_max_size {
                pool_settings.max_size = max_size;
            }
            let pool = DbPool::connect(&pool_settings)
                .await
                .map_err(|e| std::io::Error::other(format!("pool setup failed: {e}")))?;
            Some(pool)
        }
        None => {
            warn!("no database URL configured; running on the in-memory store (dev only)");
            None
        }
    };

    let mailer = build_mailer(&settings);
    let built = build_state(db_pool.as_ref(), mailer, settings.public_base_url());

    #[cfg(feature = "seed-data")]
    {
        // Seeding is driven by SEED_* environment variables; application
        // flags belong to AppSettings, so only the program name is passed.
        let seed_settings =
            backend::seed::SeedSettings::load_from_iter([std::ffi::OsString::from("backend")])
                .map_err(|e| std::io::Error::other(format!("seed configuration error: {e}")))?;
        backend::seed::seed_on_startup(&seed_settings, built.seeder.clone())
            .await
            .map_err(|e| std::io::Error::other(format!("seeding failed: {e}")))?;
    }

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(key, settings.cookie_secure, SameSite::Lax, bind_addr);
    info!(%bind_addr, "starting HTTP server");
    let server = create_server(health_state, built.http, config)?;
    server.await
}
