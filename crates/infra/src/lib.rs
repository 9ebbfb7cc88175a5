//! # BotPub Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The HTTP transport ([`ApiClient`]) used by the publication bindings
//! - Retrying HTTP client built on reqwest
//! - Configuration loading (environment, `.env`, JSON/TOML files)
//! - Logging setup
//!
//! ## Architecture
//! - Implements traits defined in `botpub-core`
//! - Depends on `botpub-domain` and `botpub-core`
//! - Contains all "impure" code (network, filesystem, environment)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;

// Re-export commonly used items
pub use api::{ApiClient, ApiClientBuilder, ApiError, Credentials};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use observability::init_logging;
