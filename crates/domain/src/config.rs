//! Client configuration structures
//!
//! Every section carries serde defaults so a config file only needs the
//! fields it wants to override.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BACKOFF_MS, DEFAULT_API_BASE_URL, DEFAULT_API_MAX_ATTEMPTS,
    DEFAULT_API_TIMEOUT_SECS, DEFAULT_CACHE_MAX_CAPACITY, DEFAULT_CACHE_TTL_SECS,
    DEFAULT_LOG_LEVEL,
};

/// Top-level client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote API connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL, e.g. `https://xxxx.execute-api.us-east-1.amazonaws.com/api`
    pub base_url: String,
    pub timeout_secs: u64,
    /// Total attempts per request (initial try + retries)
    pub max_attempts: usize,
    pub backoff_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_API_TIMEOUT_SECS,
            max_attempts: DEFAULT_API_MAX_ATTEMPTS,
            backoff_ms: DEFAULT_API_BACKOFF_MS,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }

    /// Deadline for one call with all of its retries: every attempt may run
    /// for the full `timeout`, with doubling backoff between attempts.
    pub fn request_deadline(&self) -> Duration {
        let attempts = self.max_attempts.max(1);
        let per_attempt = u32::try_from(attempts).unwrap_or(u32::MAX);
        let mut deadline = self.timeout().saturating_mul(per_attempt);
        for retry in 0..attempts - 1 {
            let shift = u32::try_from(retry.min(8)).unwrap_or(8);
            deadline = deadline.saturating_add(self.backoff().saturating_mul(1u32 << shift));
        }
        deadline
    }
}

/// GET response cache settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    pub ttl_secs: u64,
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: DEFAULT_CACHE_TTL_SECS,
            max_capacity: DEFAULT_CACHE_MAX_CAPACITY,
        }
    }
}

impl CacheConfig {
    /// Cache settings with caching turned off
    pub fn disabled() -> Self {
        Self { enabled: false, ..Self::default() }
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

crate::impl_wire_enum_conversions!(LogFormat {
    Pretty => "pretty",
    Json => "json",
});

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `botpub_infra=debug`
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: DEFAULT_LOG_LEVEL.to_string(), format: LogFormat::Pretty }
    }
}
