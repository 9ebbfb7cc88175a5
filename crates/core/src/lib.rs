//! # BotPub Core
//!
//! Request shaping for the bot publication API - no transport code.
//!
//! This crate contains:
//! - The `HttpTransport` port and the `FetchTarget` union it consumes
//! - Path builders for every endpoint
//! - `PublicationApi` and `PublishedBotApi`, which map each business
//!   operation to exactly one transport call
//!
//! ## Architecture Principles
//! - Only depends on `botpub-domain`
//! - No HTTP, caching, retry or logging code
//! - Transport errors pass through untouched

pub mod http;
pub mod publication;
pub mod published;

pub use http::paths;
pub use http::ports::{FetchTarget, HttpTransport};
pub use publication::PublicationApi;
pub use published::PublishedBotApi;
