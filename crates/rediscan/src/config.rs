use std::{env, time::Duration};

use rediscan_core::{discovery::DEFAULT_MAX_LISTS, navigator::DEFAULT_MAX_PRELOAD_SIZE};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Redis address as `host:port` (default: "localhost:6379")
    pub redis_addr: String,
    /// Redis password (default: none)
    pub redis_password: Option<String>,
    /// Redis logical database (default: 0)
    pub redis_db: i64,
    /// Maximum number of lists shown on the index page (default: 10)
    pub max_lists: usize,
    /// Lists up to this length are preloaded in full (default: 1,000)
    pub max_preload_size: usize,
    /// Glob pattern used when scanning for lists (default: "*")
    pub scan_pattern: String,
    /// Per-request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `REDIS_ADDR` - Redis address (default: "localhost:6379")
    /// - `REDIS_PASSWORD` - Redis password (default: none)
    /// - `REDIS_DB` - Redis database number (default: 0)
    /// - `MAX_LISTS` - Lists shown on the index page, must be > 0 (default: 10)
    /// - `MAX_PRELOAD_SIZE` - Preload threshold, 0 disables preloading (default: 1,000)
    /// - `SCAN_PATTERN` - Key pattern for discovery (default: "*")
    /// - `REQUEST_TIMEOUT_SECONDS` - Request timeout, must be > 0 (default: 10)
    ///
    /// Values that fail to parse fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            redis_addr: lookup("REDIS_ADDR")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| "localhost:6379".to_string()),
            redis_password: lookup("REDIS_PASSWORD").filter(|v| !v.is_empty()),
            redis_db: lookup("REDIS_DB")
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(0),
            max_lists: lookup("MAX_LISTS")
                .and_then(|v| v.parse::<usize>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(DEFAULT_MAX_LISTS),
            max_preload_size: lookup("MAX_PRELOAD_SIZE")
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(DEFAULT_MAX_PRELOAD_SIZE),
            scan_pattern: lookup("SCAN_PATTERN")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| "*".to_string()),
            request_timeout_seconds: lookup("REQUEST_TIMEOUT_SECONDS")
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(10),
        }
    }

    /// Redis connection URL built from address, password and database.
    pub fn redis_url(&self) -> String {
        match &self.redis_password {
            Some(password) => format!(
                "redis://:{}@{}/{}",
                urlencoding::encode(password),
                self.redis_addr,
                self.redis_db
            ),
            None => format!("redis://{}/{}", self.redis_addr, self.redis_db),
        }
    }

    /// Get request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
