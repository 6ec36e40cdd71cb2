//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;

use crate::cache::DEFAULT_TTL_MS;
use crate::storage::DEFAULT_QUOTA_BYTES;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Freshness window of cached lead preferences, in milliseconds
    pub prefs_ttl_ms: u64,
    /// Byte budget of the session storage substrate
    pub storage_quota_bytes: usize,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PREFS_TTL_MS` - Preference cache TTL in milliseconds (default: 300000)
    /// - `STORAGE_QUOTA_BYTES` - Session storage quota (default: 5 MiB)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            prefs_ttl_ms: parse_var("PREFS_TTL_MS").unwrap_or(defaults.prefs_ttl_ms),
            storage_quota_bytes: parse_var("STORAGE_QUOTA_BYTES")
                .unwrap_or(defaults.storage_quota_bytes),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefs_ttl_ms: DEFAULT_TTL_MS,
            storage_quota_bytes: DEFAULT_QUOTA_BYTES,
            server_port: 3000,
        }
    }
}
