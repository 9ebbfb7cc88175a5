//! Conversions from external infrastructure errors into domain errors.

use std::io::{Error as IoError, ErrorKind};

use botpub_domain::BotPubError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;
use toml::de::Error as TomlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub BotPubError);

impl From<InfraError> for BotPubError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<BotPubError> for InfraError {
    fn from(value: BotPubError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoBotPubError {
    fn into_botpub(self) -> BotPubError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → BotPubError */
/* -------------------------------------------------------------------------- */

impl IntoBotPubError for HttpError {
    fn into_botpub(self) -> BotPubError {
        if self.is_timeout() {
            return BotPubError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return BotPubError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return BotPubError::InvalidInput(format!("invalid HTTP request: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => BotPubError::Auth(message),
                404 => BotPubError::NotFound(message),
                400..=499 => BotPubError::InvalidInput(message),
                _ => BotPubError::Network(message),
            };
        }

        BotPubError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_botpub())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json / toml → BotPubError */
/* -------------------------------------------------------------------------- */

impl IntoBotPubError for JsonError {
    fn into_botpub(self) -> BotPubError {
        BotPubError::InvalidInput(format!("invalid JSON at line {}: {self}", self.line()))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_botpub())
    }
}

impl IntoBotPubError for TomlError {
    fn into_botpub(self) -> BotPubError {
        BotPubError::Config(format!("invalid TOML: {}", self.message()))
    }
}

impl From<TomlError> for InfraError {
    fn from(value: TomlError) -> Self {
        InfraError(value.into_botpub())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → BotPubError */
/* -------------------------------------------------------------------------- */

impl IntoBotPubError for IoError {
    fn into_botpub(self) -> BotPubError {
        match self.kind() {
            ErrorKind::NotFound => BotPubError::NotFound(self.to_string()),
            ErrorKind::PermissionDenied => BotPubError::Config(format!("permission denied: {self}")),
            _ => BotPubError::Internal(self.to_string()),
        }
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        InfraError(value.into_botpub())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
