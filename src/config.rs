//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;

use crate::cache::Expiry;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace prefix prepended to every storage key
    pub prefix: String,
    /// Content type recorded when an entry does not specify one
    pub default_content_type: String,
    /// Expiration applied when an entry does not request one
    pub default_expire: Expiry,
    /// Backing store host, used in connection diagnostics
    pub host: String,
    /// Backing store port, used in connection diagnostics
    pub port: u16,
    /// Pins both readiness flags true, skipping connection gating
    pub disable_connection_tracking: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_PREFIX` - Storage key namespace (default: "cache")
    /// - `CACHE_DEFAULT_TYPE` - Default content type (default: "text/html")
    /// - `CACHE_DEFAULT_EXPIRE` - Default TTL in seconds, -1 = never (default: -1)
    /// - `REDIS_HOST` - Store host for diagnostics (default: "localhost")
    /// - `REDIS_PORT` - Store port for diagnostics (default: 6379)
    /// - `CACHE_DISABLE_CONNECTION_TRACKING` - "1" or "true" to pin readiness (default: off)
    pub fn from_env() -> Self {
        let default_expire = env::var("CACHE_DEFAULT_EXPIRE")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .map(|raw| Expiry::resolve(Some(raw), Expiry::Never))
            .unwrap_or(Expiry::Never);

        Self {
            prefix: env::var("CACHE_PREFIX").unwrap_or_else(|_| "cache".to_string()),
            default_content_type: env::var("CACHE_DEFAULT_TYPE")
                .unwrap_or_else(|_| "text/html".to_string()),
            default_expire,
            host: env::var("REDIS_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: env::var("REDIS_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(6379),
            disable_connection_tracking: env::var("CACHE_DISABLE_CONNECTION_TRACKING")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix: "cache".to_string(),
            default_content_type: "text/html".to_string(),
            default_expire: Expiry::Never,
            host: "localhost".to_string(),
            port: 6379,
            disable_connection_tracking: false,
        }
    }
}
