//! In-memory transport that records every call

use std::collections::VecDeque;
use std::fmt;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::ports::{FetchTarget, HttpTransport};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub query: Option<Value>,
    pub body: Option<Value>,
}

#[derive(Debug)]
pub(crate) struct FakeError(pub String);

impl fmt::Display for FakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fake transport error: {}", self.0)
    }
}

impl std::error::Error for FakeError {}

/// Replies are served in FIFO order; an empty queue answers `null`.
#[derive(Default)]
pub(crate) struct RecordingTransport {
    calls: Mutex<Vec<RecordedCall>>,
    replies: Mutex<VecDeque<Result<Value, String>>>,
}

impl RecordingTransport {
    pub fn reply(self, value: Value) -> Self {
        self.replies.lock().unwrap().push_back(Ok(value));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.replies.lock().unwrap().push_back(Err(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record<R: DeserializeOwned>(
        &self,
        method: &'static str,
        path: &str,
        query: Option<Value>,
        body: Option<Value>,
    ) -> Result<R, FakeError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            query,
            body,
        });

        let reply = self.replies.lock().unwrap().pop_front().unwrap_or(Ok(Value::Null));
        let value = reply.map_err(FakeError)?;
        serde_json::from_value(value).map_err(|e| FakeError(e.to_string()))
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    type Error = FakeError;

    async fn get<Q, R>(&self, target: FetchTarget<'_, Q>) -> Result<Option<R>, Self::Error>
    where
        Q: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        match target {
            FetchTarget::Active { path, query } => {
                let query = query.map(|q| serde_json::to_value(q).unwrap());
                self.record("GET", &path, query, None).map(Some)
            }
            FetchTarget::Inactive => Ok(None),
        }
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, Self::Error>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let body = serde_json::to_value(body).unwrap();
        self.record("POST", path, None, Some(body))
    }

    async fn delete<B, R>(&self, path: &str, body: Option<&B>) -> Result<R, Self::Error>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let body = body.map(|b| serde_json::to_value(b).unwrap());
        self.record("DELETE", path, None, body)
    }
}
