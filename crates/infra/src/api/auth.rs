//! Request authentication
//!
//! The management endpoints (`/bot/...`, `/admin/...`) take a bearer token
//! from the signed-in user's session. A published bot's endpoint instead
//! takes one of the publication's API keys in the `x-api-key` header.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use botpub_domain::constants::API_KEY_HEADER;
use reqwest::RequestBuilder;

use super::errors::ApiError;

/// Trait for providing access tokens
///
/// This trait allows dependency injection and testing with mock providers.
/// Session handling (login, refresh, storage) lives behind it.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get a valid access token
    ///
    /// This method should handle token refresh if needed.
    async fn access_token(&self) -> Result<String, ApiError>;
}

/// Provider returning a fixed token
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

impl fmt::Debug for StaticTokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticTokenProvider").field("token", &"<redacted>").finish()
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String, ApiError> {
        if self.token.is_empty() {
            return Err(ApiError::Auth("access token is empty".into()));
        }
        Ok(self.token.clone())
    }
}

/// How outgoing requests are authenticated
#[derive(Clone, Default)]
pub enum Credentials {
    #[default]
    None,
    /// `Authorization: Bearer <token>`, token fetched for every request
    Bearer(Arc<dyn AccessTokenProvider>),
    /// `x-api-key: <key>` for calls to a published bot
    ApiKey(String),
}

impl Credentials {
    pub fn bearer(provider: Arc<dyn AccessTokenProvider>) -> Self {
        Self::Bearer(provider)
    }

    pub fn api_key(key: impl Into<String>) -> Self {
        Self::ApiKey(key.into())
    }

    /// Attach the credentials to a request
    pub async fn apply(&self, request: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        match self {
            Self::None => Ok(request),
            Self::Bearer(provider) => {
                let token = provider.access_token().await?;
                Ok(request.bearer_auth(token))
            }
            Self::ApiKey(key) => Ok(request.header(API_KEY_HEADER, key)),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("Credentials::None"),
            Self::Bearer(_) => f.write_str("Credentials::Bearer(..)"),
            Self::ApiKey(_) => f.write_str("Credentials::ApiKey(<redacted>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_of(request: RequestBuilder, name: &str) -> Option<String> {
        let request = request.build().unwrap();
        request.headers().get(name).map(|v| v.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn static_provider_returns_token() {
        let provider = StaticTokenProvider::new("test-token");
        assert_eq!(provider.access_token().await.unwrap(), "test-token");
    }

    #[tokio::test]
    async fn empty_static_token_is_an_auth_error() {
        let provider = StaticTokenProvider::new("");
        assert!(matches!(provider.access_token().await, Err(ApiError::Auth(_))));
    }

    #[tokio::test]
    async fn bearer_credentials_set_authorization_header() {
        let client = reqwest::Client::new();
        let credentials = Credentials::bearer(Arc::new(StaticTokenProvider::new("abc")));

        let request = credentials.apply(client.get("http://localhost/x")).await.unwrap();

        assert_eq!(header_of(request, "authorization").as_deref(), Some("Bearer abc"));
    }

    #[tokio::test]
    async fn api_key_credentials_set_api_key_header() {
        let client = reqwest::Client::new();
        let credentials = Credentials::api_key("k-123");

        let request = credentials.apply(client.get("http://localhost/x")).await.unwrap();

        assert_eq!(header_of(request, API_KEY_HEADER).as_deref(), Some("k-123"));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let rendered = format!("{:?}", Credentials::api_key("super-secret"));
        assert!(!rendered.contains("super-secret"));
    }
}
