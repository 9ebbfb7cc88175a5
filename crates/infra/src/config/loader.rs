//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Reads a `.env` file from the working directory if there is one
//! 2. Attempts to load from environment variables
//! 3. If `BOTPUB_API_BASE_URL` is unset or a value is invalid, falls back
//!    to loading from file
//! 4. Probes multiple paths for config files
//! 5. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `BOTPUB_API_BASE_URL`: API base URL (required)
//! - `BOTPUB_API_TIMEOUT_SECS`: Per-request timeout in seconds
//! - `BOTPUB_API_MAX_ATTEMPTS`: Total attempts per request, retries included
//! - `BOTPUB_API_BACKOFF_MS`: Base retry backoff in milliseconds
//! - `BOTPUB_CACHE_ENABLED`: Whether GET responses are cached (true/false)
//! - `BOTPUB_CACHE_TTL_SECS`: Cache entry lifetime in seconds
//! - `BOTPUB_CACHE_MAX_CAPACITY`: Maximum number of cached responses
//! - `BOTPUB_LOG_LEVEL`: Log filter directive (`info`, `botpub_infra=debug`)
//! - `BOTPUB_LOG_FORMAT`: `pretty` or `json`
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./botpub.json` or `./botpub.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use botpub_domain::{
    ApiConfig, BotPubError, CacheConfig, ClientConfig, LogFormat, LoggingConfig, Result,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables (after reading any
/// `.env` file). If the base URL is missing or a value cannot be parsed,
/// falls back to loading from a config file.
///
/// # Errors
/// Returns `BotPubError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
pub fn load() -> Result<ClientConfig> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Only `BOTPUB_API_BASE_URL` is required; every other variable falls
/// back to its default when unset.
///
/// # Errors
/// Returns `BotPubError::Config` if the base URL is missing or a variable
/// has an invalid value.
pub fn load_from_env() -> Result<ClientConfig> {
    let api_defaults = ApiConfig::default();
    let api = ApiConfig {
        base_url: env_var("BOTPUB_API_BASE_URL")?,
        timeout_secs: env_parse("BOTPUB_API_TIMEOUT_SECS", api_defaults.timeout_secs)?,
        max_attempts: env_parse("BOTPUB_API_MAX_ATTEMPTS", api_defaults.max_attempts)?,
        backoff_ms: env_parse("BOTPUB_API_BACKOFF_MS", api_defaults.backoff_ms)?,
    };

    let cache_defaults = CacheConfig::default();
    let cache = CacheConfig {
        enabled: env_bool("BOTPUB_CACHE_ENABLED", cache_defaults.enabled),
        ttl_secs: env_parse("BOTPUB_CACHE_TTL_SECS", cache_defaults.ttl_secs)?,
        max_capacity: env_parse("BOTPUB_CACHE_MAX_CAPACITY", cache_defaults.max_capacity)?,
    };

    let logging_defaults = LoggingConfig::default();
    let logging = LoggingConfig {
        level: std::env::var("BOTPUB_LOG_LEVEL").unwrap_or(logging_defaults.level),
        format: env_parse::<LogFormat>("BOTPUB_LOG_FORMAT", logging_defaults.format)?,
    };

    Ok(ClientConfig { api, cache, logging })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
/// Sections and fields left out of the file take their defaults.
///
/// # Errors
/// Returns `BotPubError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(BotPubError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            BotPubError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| BotPubError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| BotPubError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| BotPubError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(BotPubError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches for config files in the following locations (in order):
/// 1. Current working directory (`./config.{json,toml}`,
///    `./botpub.{json,toml}`)
/// 2. Parent directories (up to 2 levels)
/// 3. Relative to executable location
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> [PathBuf; 8] {
    [
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("botpub.json"),
        dir.join("botpub.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

/// Get required environment variable
///
/// An empty value counts as unset.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty()).ok_or_else(|| {
        BotPubError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Parse an optional environment variable, using `default` when unset
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| BotPubError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(default),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
