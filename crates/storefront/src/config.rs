//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `QUICKBITE_HOST` - Bind address (default: 127.0.0.1)
//! - `QUICKBITE_PORT` - Listen port (default: 3000)
//! - `QUICKBITE_DATA_DIR` - Directory holding the saved cart (default: .quickbite)
//! - `QUICKBITE_CATALOG_PATH` - JSON menu file replacing the built-in menu
//! - `QUICKBITE_NOTIFICATION_MS` - How long notifications stay up (default: 2000)
//! - `QUICKBITE_CHECKOUT_DELAY_MS` - Pause before a placed order clears the cart (default: 2000)
//! - `QUICKBITE_TICK_MS` - Background timer poll interval (default: 250)
//! - `QUICKBITE_STATIC_DIR` - Stylesheet directory (default: crates/storefront/static)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::controller::Timings;

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
    /// Directory for the local key-value store
    pub data_dir: PathBuf,
    /// Optional menu file; the built-in menu is used when unset
    pub catalog_path: Option<PathBuf>,
    /// Notification and checkout timer durations
    pub timings: Timings,
    /// How often the background task polls timers
    pub tick: Duration,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "production")
    pub sentry_environment: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            data_dir: PathBuf::from(".quickbite"),
            catalog_path: None,
            timings: Timings::default(),
            tick: Duration::from_millis(250),
            static_dir: PathBuf::from("crates/storefront/static"),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
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

    /// Load configuration through an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = parse_or(&lookup, "QUICKBITE_HOST", defaults.host)?;
        let port = parse_or(&lookup, "QUICKBITE_PORT", defaults.port)?;
        let data_dir = lookup("QUICKBITE_DATA_DIR").map_or(defaults.data_dir, PathBuf::from);
        let catalog_path = lookup("QUICKBITE_CATALOG_PATH").map(PathBuf::from);
        let static_dir = lookup("QUICKBITE_STATIC_DIR").map_or(defaults.static_dir, PathBuf::from);

        let timings = Timings {
            notification: millis_or(
                &lookup,
                "QUICKBITE_NOTIFICATION_MS",
                defaults.timings.notification,
            )?,
            checkout_delay: millis_or(
                &lookup,
                "QUICKBITE_CHECKOUT_DELAY_MS",
                defaults.timings.checkout_delay,
            )?,
        };
        let tick = millis_or(&lookup, "QUICKBITE_TICK_MS", defaults.tick)?;
        if tick.is_zero() {
            return Err(ConfigError::InvalidEnvVar(
                "QUICKBITE_TICK_MS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            host,
            port,
            data_dir,
            catalog_path,
            timings,
            tick,
            static_dir,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
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

/// Parse a variable, falling back to `default` when unset.
fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Parse a millisecond count into a `Duration`.
fn millis_or(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    let default_ms = u64::try_from(default.as_millis()).unwrap_or(u64::MAX);
    parse_or(lookup, key, default_ms).map(Duration::from_millis)
}
