//! GET response cache
//!
//! Keys are the request URL from the path onwards (`/bot/b1/publication?x=1`).
//! Values are the decoded JSON body, shared between readers.

use std::future::Future;
use std::sync::Arc;

use botpub_domain::CacheConfig;
use moka::future::Cache;
use serde_json::Value;
use tracing::debug;

use super::errors::ApiError;

#[derive(Clone)]
pub struct ResponseCache {
    entries: Cache<String, Arc<Value>>,
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("entry_count", &self.entries.entry_count())
            .finish_non_exhaustive()
    }
}

impl ResponseCache {
    /// Build a cache from config, or `None` when caching is disabled.
    pub fn from_config(config: &CacheConfig) -> Option<Self> {
        if !config.enabled || config.max_capacity == 0 {
            return None;
        }

        let entries = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(config.ttl())
            .support_invalidation_closures()
            .build();

        Some(Self { entries })
    }

    /// Return the cached body for `key`, or run `fetch` and cache its result.
    ///
    /// Concurrent callers with the same key share one `fetch`. Failures are
    /// returned to all of them and nothing is stored.
    pub async fn get_or_fetch<F>(&self, key: String, fetch: F) -> Result<Arc<Value>, ApiError>
    where
        F: Future<Output = Result<Value, ApiError>>,
    {
        self.entries
            .try_get_with(key, async move { fetch.await.map(Arc::new) })
            .await
            .map_err(|err| (*err).clone())
    }

    pub async fn get(&self, key: &str) -> Option<Arc<Value>> {
        self.entries.get(key).await
    }

    /// Drop every entry whose path is an ancestor or descendant of `path`
    /// (including `path` itself, under any query string).
    pub fn invalidate_related(&self, path: &str) -> Result<(), ApiError> {
        let mutated: Vec<String> = segments(path).map(str::to_owned).collect();
        debug!(path, "invalidating related cache entries");

        self.entries
            .invalidate_entries_if(move |key, _| {
                let cached: Vec<&str> = segments(key_path(key)).collect();
                is_prefix(&cached, &mutated) || is_prefix(&mutated, &cached)
            })
            .map(|_| ())
            .map_err(|err| ApiError::Config(format!("cache invalidation unavailable: {err}")))
    }

    pub fn clear(&self) {
        self.entries.invalidate_all();
    }

    /// Approximate; pending maintenance may lag behind recent writes.
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }
}

fn key_path(key: &str) -> &str {
    key.split_once('?').map_or(key, |(path, _)| path)
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

fn is_prefix<A: AsRef<str>, B: AsRef<str>>(short: &[A], long: &[B]) -> bool {
    short.len() <= long.len()
        && short.iter().zip(long).all(|(a, b)| a.as_ref() == b.as_ref())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use serde_json::json;

    use super::*;

    fn cache() -> ResponseCache {
        ResponseCache::from_config(&CacheConfig::default()).expect("cache enabled by default")
    }

    async fn seed(cache: &ResponseCache, key: &str) {
        let value = json!({ "key": key });
        cache.get_or_fetch(key.to_string(), async move { Ok(value) }).await.unwrap();
    }

    #[test]
    fn disabled_config_builds_no_cache() {
        assert!(ResponseCache::from_config(&CacheConfig::disabled()).is_none());
        let zero = CacheConfig { max_capacity: 0, ..CacheConfig::default() };
        assert!(ResponseCache::from_config(&zero).is_none());
    }

    #[tokio::test]
    async fn second_lookup_is_served_from_cache() {
        let cache = cache();
        let fetches = AtomicUsize::new(0);

        for _ in 0..2 {
            let value = cache
                .get_or_fetch("/admin/public-bots".into(), async {
                    fetches.fetch_add(1, Ordering::SeqCst);
                    Ok(json!([]))
                })
                .await
                .unwrap();
            assert_eq!(*value, json!([]));
        }

        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_lookups_share_one_fetch() {
        let cache = cache();
        let fetches = Arc::new(AtomicUsize::new(0));

        let lookups = (0..8).map(|_| {
            let cache = cache.clone();
            let fetches = Arc::clone(&fetches);
            async move {
                cache
                    .get_or_fetch("/bot/b1/publication".into(), async move {
                        fetches.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(20)).await;
                        Ok(json!({ "stage": "dev" }))
                    })
                    .await
            }
        });
        let results = futures::future::join_all(lookups).await;

        assert!(results.iter().all(Result::is_ok));
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let cache = cache();

        let first = cache
            .get_or_fetch("/bot/b1/publication".into(), async {
                Err(ApiError::Server("boom".into()))
            })
            .await;
        assert_eq!(first, Err(ApiError::Server("boom".into())));

        let second = cache
            .get_or_fetch("/bot/b1/publication".into(), async { Ok(json!({ "ok": true })) })
            .await
            .unwrap();
        assert_eq!(*second, json!({ "ok": true }));
    }

    #[tokio::test]
    async fn invalidation_follows_path_segments() {
        let cache = cache();
        for key in [
            "/bot/b1/publication",
            "/bot/b1/publication?stage=dev",
            "/bot/b1/publication/api-key/k1",
            "/bot/b10/publication",
            "/admin/public-bots",
        ] {
            seed(&cache, key).await;
        }

        cache.invalidate_related("/bot/b1/publication/api-key").unwrap();

        assert!(cache.get("/bot/b1/publication").await.is_none());
        assert!(cache.get("/bot/b1/publication?stage=dev").await.is_none());
        assert!(cache.get("/bot/b1/publication/api-key/k1").await.is_none());
        assert!(cache.get("/bot/b10/publication").await.is_some());
        assert!(cache.get("/admin/public-bots").await.is_some());
    }

    #[tokio::test]
    async fn clear_drops_everything() {
        let cache = cache();
        seed(&cache, "/admin/public-bots").await;

        cache.clear();

        assert!(cache.get("/admin/public-bots").await.is_none());
    }

    #[test]
    fn prefix_matching_is_segment_wise() {
        let a: Vec<&str> = segments("/bot/b1").collect();
        let b: Vec<&str> = segments("/bot/b10/publication").collect();
        assert!(!is_prefix(&a, &b));
        assert!(is_prefix(&a, &a));
        assert_eq!(key_path("/x/y?z=1"), "/x/y");
    }
}
