//! API-specific error types
//!
//! Transport failures by kind, as surfaced to binding callers. Retry
//! decisions live in [`crate::http::HttpClient`].

use std::time::Duration;

use botpub_domain::BotPubError;
use thiserror::Error;

/// API operation errors
///
/// `Clone` so a single failure can be handed to every caller that was
/// waiting on the same coalesced request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),
}

impl From<BotPubError> for ApiError {
    fn from(err: BotPubError) -> Self {
        match err {
            BotPubError::Network(message) => Self::Network(message),
            BotPubError::Auth(message) => Self::Auth(message),
            BotPubError::Config(message) => Self::Config(message),
            BotPubError::NotFound(message) | BotPubError::InvalidInput(message) => {
                Self::Client(message)
            }
            BotPubError::Internal(message) => Self::Server(message),
        }
    }
}
