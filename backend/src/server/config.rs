//! Server configuration: layered settings plus the assembled runtime config.

use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:8080";

/// Application settings resolved from flags, environment, and config file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "APP")]
pub struct AppSettings {
    /// Socket address to bind, e.g. `0.0.0.0:8080`.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL; without it the server runs on the
    /// in-memory store (local development only).
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Path to the session key file.
    pub session_key_file: Option<PathBuf>,
    /// Allow an ephemeral session key outside debug builds.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Mark the session cookie `Secure`.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
    /// Public base URL used in verification links.
    pub public_base_url: Option<String>,
    /// Transactional mail API key; without it mail is logged, not sent.
    pub mail_api_key: Option<String>,
    /// Sender address for transactional mail.
    pub mail_from: Option<String>,
}

impl AppSettings {
    /// The configured bind address, falling back to the default.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }

    /// The configured public base URL, falling back to the default.
    #[must_use]
    pub fn public_base_url(&self) -> String {
        self.public_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_PUBLIC_BASE_URL.to_owned())
    }

    /// The configured session key file, falling back to the conventional
    /// secrets path.
    #[must_use]
    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("/var/run/secrets/session_key"))
    }
}

/// Assembled configuration handed to the HTTP server factory.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Construct a server configuration.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_settings() -> AppSettings {
        AppSettings {
            bind_addr: None,
            database_url: None,
            pool_max_size: None,
            session_key_file: None,
            session_allow_ephemeral: false,
            cookie_secure: true,
            public_base_url: None,
            mail_api_key: None,
            mail_from: None,
        }
    }

    #[test]
    fn defaults_fill_the_gaps() {
        let settings = empty_settings();
        assert_eq!(
            settings.bind_addr().expect("default parses").to_string(),
            "0.0.0.0:8080"
        );
        assert_eq!(settings.public_base_url(), "http://localhost:8080");
        assert_eq!(
            settings.session_key_file(),
            PathBuf::from("/var/run/secrets/session_key")
        );
    }

    #[test]
    fn explicit_values_win() {
        let mut settings = empty_settings();
        settings.bind_addr = Some("127.0.0.1:9000".to_owned());
        settings.public_base_url = Some("https://league.example".to_owned());
        assert_eq!(
            settings.bind_addr().expect("explicit parses").to_string(),
            "127.0.0.1:9000"
        );
        assert_eq!(settings.public_base_url(), "https://league.example");
    }
}
