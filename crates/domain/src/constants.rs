//! Domain constants
//!
//! Defaults shared by the configuration structs and the infra loader.

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_API_MAX_ATTEMPTS: usize = 3;
pub const DEFAULT_API_BACKOFF_MS: u64 = 200;

// Response cache
pub const DEFAULT_CACHE_TTL_SECS: u64 = 15;
pub const DEFAULT_CACHE_MAX_CAPACITY: u64 = 1000;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Header carrying a publication API key on calls to a published bot
pub const API_KEY_HEADER: &str = "x-api-key";
