//! Service configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use std::net::SocketAddr;
use std::time::Duration;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable, one line per event.
    Text,
    /// One JSON object per event.
    Json,
}

/// Top-level service configuration.
///
/// Loaded once at startup via [`BookingConfig::from_env`].
#[derive(Debug, Clone)]
pub struct BookingConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:8000`).
    pub listen_addr: SocketAddr,

    /// SQLite connection string (`sqlite://trades.db`, `sqlite::memory:`).
    pub database_url: String,

    /// Maximum number of database connections in the pool.
    pub database_max_connections: u32,

    /// Minimum idle connections in the pool.
    pub database_min_connections: u32,

    /// Timeout in seconds for acquiring a database connection.
    pub database_connect_timeout_secs: u64,

    /// Seconds before an in-flight request is aborted.
    pub request_timeout_secs: u64,

    /// Whether to allow any origin, method, and header.
    pub cors_permissive: bool,

    /// Log line format.
    pub log_format: LogFormat,
}

impl BookingConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, std::net::AddrParseError> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8000".to_string())
            .parse()?;

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://trades.db".to_string());

        let log_format = match std::env::var("LOG_FORMAT").ok().as_deref() {
            Some("json") | Some("JSON") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            listen_addr,
            database_url,
            database_max_connections: parse_env("DATABASE_MAX_CONNECTIONS", 10),
            database_min_connections: parse_env("DATABASE_MIN_CONNECTIONS", 1),
            database_connect_timeout_secs: parse_env("DATABASE_CONNECT_TIMEOUT_SECS", 5),
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", 30),
            cors_permissive: parse_env_bool("CORS_PERMISSIVE", true),
            log_format,
        })
    }

    /// Returns a configuration backed by a private in-memory database.
    ///
    /// `sqlx` opens memory URLs as a named shared-cache database, so every
    /// connection of one pool sees the same data. The pool is still kept to
    /// a single connection to make exhaustion easy to reproduce in tests.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            database_url: "sqlite::memory:".to_string(),
            database_max_connections: 1,
            database_min_connections: 1,
            database_connect_timeout_secs: 5,
            request_timeout_secs: 30,
            cors_permissive: true,
            log_format: LogFormat::Text,
        }
    }

    /// Connection acquisition timeout as a [`Duration`].
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.database_connect_timeout_secs)
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key)
        .ok()
        .map(|v| v.to_ascii_lowercase())
        .as_deref()
    {
        Some("true") | Some("1") => true,
        Some("false") | Some("0") => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variables_use_defaults() {
        assert_eq!(parse_env("TRADE_BOOKING_TEST_UNSET_NUMBER", 42u32), 42);
        assert!(parse_env_bool("TRADE_BOOKING_TEST_UNSET_BOOL", true));
        assert!(!parse_env_bool("TRADE_BOOKING_TEST_UNSET_BOOL", false));
    }

    #[test]
    fn in_memory_uses_single_connection() {
        let config = BookingConfig::in_memory();
        assert_eq!(config.database_max_connections, 1);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }
}
