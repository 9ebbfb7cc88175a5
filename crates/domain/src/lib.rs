//! # BotPub Domain
//!
//! Request and response records for the bot publication API.
//!
//! This crate contains:
//! - Publication, public bot and API key records
//! - Published-bot chat records (conversation endpoint of a publication)
//! - Domain error types and Result definitions
//! - Client configuration structures
//!
//! ## Architecture
//! - No dependencies on other BotPub crates
//! - Only external dependencies allowed
//! - Pure data, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
