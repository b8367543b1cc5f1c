//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_CATALOG` - Catalog file path or `http(s)://` URL (default: `Products.CSV`)
//! - `STOREFRONT_NOTICE_TTL_MS` - How long messages stay visible (default: 2500)
//! - `STOREFRONT_STATIC_DIR` - Stylesheet and script directory (default: `crates/storefront/static`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0-1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate, 0.0-1.0 (default: 0.0)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use moodshop_core::notice::DEFAULT_NOTICE_TTL;
use thiserror::Error;

use crate::catalog::CatalogSource;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_CATALOG: &str = "Products.CSV";
const DEFAULT_STATIC_DIR: &str = "crates/storefront/static";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Where the product catalog is read from
    pub catalog: CatalogSource,
    /// How long a notice stays visible
    pub notice_ttl: Duration,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "production")
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Defaults for everything except the catalog source.
    #[must_use]
    pub fn new(catalog: CatalogSource) -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            catalog,
            notice_ttl: DEFAULT_NOTICE_TTL,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let catalog = lookup("STOREFRONT_CATALOG").unwrap_or_else(|| DEFAULT_CATALOG.to_string());
        let mut config = Self::new(parse_var("STOREFRONT_CATALOG", &catalog)?);

        if let Some(host) = lookup("STOREFRONT_HOST") {
            config.host = parse_var("STOREFRONT_HOST", &host)?;
        }
        if let Some(port) = lookup("STOREFRONT_PORT") {
            config.port = parse_var("STOREFRONT_PORT", &port)?;
        }
        if let Some(ttl) = lookup("STOREFRONT_NOTICE_TTL_MS") {
            config.notice_ttl = Duration::from_millis(parse_var("STOREFRONT_NOTICE_TTL_MS", &ttl)?);
        }
        if let Some(dir) = lookup("STOREFRONT_STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }

        config.sentry_dsn = lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty());
        config.sentry_environment = lookup("SENTRY_ENVIRONMENT");
        if let Some(rate) = lookup("SENTRY_SAMPLE_RATE") {
            config.sentry_sample_rate = parse_rate("SENTRY_SAMPLE_RATE", &rate)?;
        }
        if let Some(rate) = lookup("SENTRY_TRACES_SAMPLE_RATE") {
            config.sentry_traces_sample_rate = parse_rate("SENTRY_TRACES_SAMPLE_RATE", &rate)?;
        }

        Ok(config)
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable's value, naming the variable in the error.
fn parse_var<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a sample rate in `0.0..=1.0`.
fn parse_rate(key: &str, value: &str) -> Result<f32, ConfigError> {
    let rate: f32 = parse_var(key, value)?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("{rate} is outside 0.0..=1.0"),
        ));
    }
    Ok(rate)
}
