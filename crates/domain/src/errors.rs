//! Error types used throughout the workspace

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for BotPub
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum BotPubError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for BotPub operations
pub type Result<T> = std::result::Result<T, BotPubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_tagged_message() {
        let err = BotPubError::Auth("token expired".into());
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json, serde_json::json!({ "type": "Auth", "message": "token expired" }));
        assert_eq!(err.to_string(), "Authentication error: token expired");
    }
}
