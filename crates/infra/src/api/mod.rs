//! Transport for the bot publication API
//!
//! [`ApiClient`] is the production [`botpub_core::HttpTransport`]. It
//! handles authentication, retries, status mapping and a GET response
//! cache so the bindings in `botpub-core` only describe requests.
//!
//! # Architecture
//!
//! - Built on [`crate::http::HttpClient`] (no direct reqwest client)
//! - Bearer token or `x-api-key` authentication
//! - Timeout on every call
//! - moka-backed cache with write-through invalidation

pub mod auth;
pub mod cache;
pub mod client;
pub mod errors;

pub use auth::{AccessTokenProvider, Credentials, StaticTokenProvider};
pub use cache::ResponseCache;
pub use client::{ApiClient, ApiClientBuilder};
pub use errors::ApiError;
