//! Port interface for the HTTP client collaborator
//!
//! The bindings in this crate only decide *what* to request. Everything
//! else (URL joining, serialization, auth, retries, caching, status
//! handling) belongs to the implementation of [`HttpTransport`].

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Target of a read request.
///
/// `Inactive` tells the transport that no request should be made, typically
/// because an identifier the path depends on has not resolved yet. The
/// transport must neither hit the network nor consult its cache for it.
#[derive(Debug)]
pub enum FetchTarget<'a, Q = ()> {
    Active {
        /// Path relative to the API base, starting with `/`
        path: String,
        /// Record whose top-level fields become query parameters
        query: Option<&'a Q>,
    },
    Inactive,
}

impl<'a> FetchTarget<'a, ()> {
    /// Active target without query parameters
    pub fn path(path: impl Into<String>) -> Self {
        Self::Active { path: path.into(), query: None }
    }
}

impl<'a, Q> FetchTarget<'a, Q> {
    pub fn with_query(path: impl Into<String>, query: Option<&'a Q>) -> Self {
        Self::Active { path: path.into(), query }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    /// Path of an active target
    pub fn path_str(&self) -> Option<&str> {
        match self {
            Self::Active { path, .. } => Some(path),
            Self::Inactive => None,
        }
    }
}

// Derived impls would require `Q: Clone`/`Q: Copy`; only the reference is copied.
impl<Q> Clone for FetchTarget<'_, Q> {
    fn clone(&self) -> Self {
        match self {
            Self::Active { path, query } => Self::Active { path: path.clone(), query: *query },
            Self::Inactive => Self::Inactive,
        }
    }
}

/// HTTP client capability consumed by the bindings
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Error surfaced unchanged to callers of the bindings
    type Error: std::error::Error + Send + Sync + 'static;

    /// Issue a GET for an active target.
    ///
    /// Returns `Ok(None)` for [`FetchTarget::Inactive`] without doing any
    /// work.
    async fn get<Q, R>(&self, target: FetchTarget<'_, Q>) -> Result<Option<R>, Self::Error>
    where
        Q: Serialize + Sync,
        R: DeserializeOwned + Send;

    /// Issue a POST with a JSON body
    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, Self::Error>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send;

    /// Issue a DELETE, with a JSON body when one is given
    async fn delete<B, R>(&self, path: &str, body: Option<&B>) -> Result<R, Self::Error>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send;
}

#[async_trait]
impl<T: HttpTransport> HttpTransport for Arc<T> {
    type Error = T::Error;

    async fn get<Q, R>(&self, target: FetchTarget<'_, Q>) -> Result<Option<R>, Self::Error>
    where
        Q: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        (**self).get(target).await
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, Self::Error>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        (**self).post(path, body).await
    }

    async fn delete<B, R>(&self, path: &str, body: Option<&B>) -> Result<R, Self::Error>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        (**self).delete(path, body).await
    }
}
