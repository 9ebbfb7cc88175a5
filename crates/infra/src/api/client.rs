//! HTTP transport for the publication bindings
//!
//! [`ApiClient`] implements [`HttpTransport`]: it joins paths onto the
//! configured base URL, authenticates, retries through [`HttpClient`],
//! maps non-success statuses to [`ApiError`] and caches GET bodies.

use std::time::Duration;

use async_trait::async_trait;
use botpub_core::{paths, FetchTarget, HttpTransport};
use botpub_domain::{ApiConfig, CacheConfig, ClientConfig};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};
use url::{Position, Url};

use super::auth::Credentials;
use super::cache::ResponseCache;
use super::errors::ApiError;
use crate::http::HttpClient;

const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// API client with retry, auth and a GET response cache
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: HttpClient,
    credentials: Credentials,
    timeout: Duration,
    cache: Option<ResponseCache>,
}

impl ApiClient {
    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Build a client from a loaded [`ClientConfig`].
    pub fn from_config(config: &ClientConfig, credentials: Credentials) -> Result<Self, ApiError> {
        Self::builder()
            .api_config(config.api.clone())
            .cache_config(config.cache.clone())
            .credentials(credentials)
            .build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cache(&self) -> Option<&ResponseCache> {
        self.cache.as_ref()
    }

    /// Drop cached responses for `path`, its ancestors and its descendants.
    pub fn invalidate(&self, path: &str) -> Result<(), ApiError> {
        match &self.cache {
            Some(cache) => cache.invalidate_related(&self.url_path(path)?),
            None => Ok(()),
        }
    }

    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }

    /// Health check for API
    ///
    /// Returns `Ok(false)` when the API answers with a non-success status.
    /// Never served from the cache.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<bool, ApiError> {
        let url = self.url("/health");
        debug!(url = %url, "Health check");

        let request = self.http.request(Method::GET, &url);
        let response = tokio::time::timeout(HEALTH_CHECK_TIMEOUT, self.http.send(request))
            .await
            .map_err(|_| {
                warn!("Health check timeout");
                ApiError::Timeout(HEALTH_CHECK_TIMEOUT)
            })?;

        match response {
            Ok(resp) if resp.status().is_success() => {
                info!("API is healthy");
                Ok(true)
            }
            Ok(resp) => {
                warn!(status = %resp.status(), "API returned non-success status");
                Ok(false)
            }
            Err(e) => {
                warn!(error = %e, "Health check failed");
                Err(ApiError::from(e))
            }
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Path component of the absolute URL for `path`, as it appears in cache keys
    fn url_path(&self, path: &str) -> Result<String, ApiError> {
        let url = Url::parse(&self.url(path))
            .map_err(|e| ApiError::Client(format!("invalid request path {path}: {e}")))?;
        Ok(url.path().to_string())
    }

    /// Send a request and decode its body into JSON.
    #[instrument(skip(self, builder), fields(method = %method, path = %path))]
    async fn execute(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<Value, ApiError> {
        let request = self.credentials.apply(builder).await?;
        debug!("sending API request");

        let response = match tokio::time::timeout(self.timeout, self.http.send(request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => return Err(ApiError::from(err)),
            Err(_) => return Err(ApiError::Timeout(self.timeout)),
        };

        let value = read_json(response).await?;
        info!("API request successful");
        Ok(value)
    }

    /// Writes under `/bot/` also drop the public bot list, which reports
    /// publication state.
    fn invalidate_after_write(&self, path: &str) {
        let mut stale = vec![path];
        if path.starts_with("/bot/") {
            stale.push(paths::PUBLIC_BOTS);
        }
        for path in stale {
            if let Err(err) = self.invalidate(path) {
                warn!(path, error = %err, "failed to invalidate cached responses");
            }
        }
    }
}

#[async_trait]
impl HttpTransport for ApiClient {
    type Error = ApiError;

    async fn get<Q, R>(&self, target: FetchTarget<'_, Q>) -> Result<Option<R>, ApiError>
    where
        Q: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let FetchTarget::Active { path, query } = target else {
            return Ok(None);
        };

        let mut builder = self.http.request(Method::GET, self.url(&path));
        if let Some(query) = query {
            builder = builder.query(query);
        }

        match &self.cache {
            Some(cache) => {
                let key = cache_key(&builder)?;
                let value =
                    cache.get_or_fetch(key, self.execute(Method::GET, &path, builder)).await?;
                decode(&value).map(Some)
            }
            None => {
                let value = self.execute(Method::GET, &path, builder).await?;
                decode(&value).map(Some)
            }
        }
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let builder = self.http.request(Method::POST, self.url(path)).json(body);
        let value = self.execute(Method::POST, path, builder).await?;
        self.invalidate_after_write(path);
        decode(&value)
    }

    async fn delete<B, R>(&self, path: &str, body: Option<&B>) -> Result<R, ApiError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let mut builder = self.http.request(Method::DELETE, self.url(path));
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let value = self.execute(Method::DELETE, path, builder).await?;
        self.invalidate_after_write(path);
        decode(&value)
    }
}

/// URL of the request from the path onwards, query string included
fn cache_key(builder: &RequestBuilder) -> Result<String, ApiError> {
    let request = builder
        .try_clone()
        .ok_or_else(|| ApiError::Client("GET request cannot be cloned".into()))?
        .build()
        .map_err(|e| ApiError::Client(format!("invalid request: {e}")))?;
    Ok(request.url()[Position::BeforePath..].to_string())
}

async fn read_json(response: Response) -> Result<Value, ApiError> {
    let status = response.status();
    let url = response.url().to_string();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(map_status_error(status, &url, body));
    }

    // 204 and 205 never carry a body
    if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
        return Ok(Value::Null);
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| ApiError::Network(format!("Failed to read response from {url}: {e}")))?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    serde_json::from_slice(&bytes)
        .map_err(|e| ApiError::Client(format!("Failed to parse response: {e}")))
}

fn decode<R: DeserializeOwned>(value: &Value) -> Result<R, ApiError> {
    R::deserialize(value).map_err(|e| ApiError::Client(format!("Unexpected response shape: {e}")))
}

fn map_status_error(status: StatusCode, url: &str, body: String) -> ApiError {
    let message = if body.is_empty() {
        format!("{url} returned status {status}")
    } else {
        format!("{url} returned status {status}: {body}")
    };

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        ApiError::Auth(message)
    } else if status == StatusCode::TOO_MANY_REQUESTS {
        ApiError::RateLimit(message)
    } else if status.is_server_error() {
        ApiError::Server(message)
    } else if status.is_client_error() {
        ApiError::Client(message)
    } else {
        ApiError::Network(message)
    }
}

/// Builder for API client
#[derive(Debug, Default)]
pub struct ApiClientBuilder {
    api: ApiConfig,
    cache: CacheConfig,
    credentials: Credentials,
    timeout: Option<Duration>,
    http: Option<HttpClient>,
}

impl ApiClientBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    /// Set the API configuration (base URL, timeout, retries)
    pub fn api_config(mut self, api: ApiConfig) -> Self {
        self.api = api;
        self
    }

    pub fn cache_config(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Overall deadline per request, retries included. Defaults to
    /// [`ApiConfig::request_deadline`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a preconfigured [`HttpClient`] instead of one built from the API config.
    pub fn http_client(mut self, http: HttpClient) -> Self {
        self.http = Some(http);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the base URL is not an absolute
    /// http(s) URL or the HTTP client cannot be created.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let parsed = Url::parse(&self.api.base_url).map_err(|e| {
            ApiError::Config(format!("invalid API base URL {}: {e}", self.api.base_url))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!(
                "API base URL must use http or https: {}",
                self.api.base_url
            )));
        }

        let http = match self.http {
            Some(http) => http,
            None => HttpClient::from_config(&self.api)
                .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {e}")))?,
        };

        Ok(ApiClient {
            base_url: self.api.base_url.trim_end_matches('/').to_string(),
            http,
            credentials: self.credentials,
            timeout: self.timeout.unwrap_or_else(|| self.api.request_deadline()),
            cache: ResponseCache::from_config(&self.cache),
        })
    }
}
