//! Coalescing fetch cache
//!
//! One instance per application, shared by `Arc`. Concurrent requests for the
//! same URL are collapsed into a single transport call by moka's
//! `try_get_with`, successful payloads are kept for every later caller and
//! failures are reported through the shared [`ErrorSlot`] without being
//! cached.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    time::Duration,
};

use application::{
    ErrorSlot,
    ports::{FetchError, FetchPort, HttpTransportPort, Payload},
};
use async_trait::async_trait;
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Configuration for the fetch cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchCacheConfig {
    /// Maximum number of cached URLs
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,

    /// Optional time-to-live; entries live until invalidated when unset
    #[serde(default)]
    pub ttl_secs: Option<u64>,
}

const fn default_max_entries() -> u64 {
    1_000
}

impl Default for FetchCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            ttl_secs: None,
        }
    }
}

/// Counters describing cache effectiveness
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Calls answered without issuing their own network request
    pub hits: u64,
    /// Calls that issued a network request
    pub misses: u64,
    /// Calls that resolved to `None`
    pub failures: u64,
    pub entries: u64,
}

/// De-duplicating, memoizing [`FetchPort`] implementation
pub struct FetchCache {
    transport: Arc<dyn HttpTransportPort>,
    entries: Cache<String, Payload>,
    errors: Arc<ErrorSlot>,
    hits: AtomicU64,
    misses: AtomicU64,
    failures: AtomicU64,
}

impl std::fmt::Debug for FetchCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchCache")
            .field("entries", &self.entries.entry_count())
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .field("failures", &self.failures.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl FetchCache {
    /// Create a cache with default configuration
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransportPort>, errors: Arc<ErrorSlot>) -> Self {
        Self::with_config(transport, errors, &FetchCacheConfig::default())
    }

    /// Create a cache with custom configuration
    #[must_use]
    pub fn with_config(
        transport: Arc<dyn HttpTransportPort>,
        errors: Arc<ErrorSlot>,
        config: &FetchCacheConfig,
    ) -> Self {
        let mut builder = Cache::builder().max_capacity(config.max_entries);
        if let Some(ttl) = config.ttl_secs {
            builder = builder.time_to_live(Duration::from_secs(ttl));
        }

        Self {
            transport,
            entries: builder.build(),
            errors,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            failures: AtomicU64::new(0),
        }
    }

    /// The slot failures are reported to
    #[must_use]
    pub fn errors(&self) -> &Arc<ErrorSlot> {
        &self.errors
    }

    /// Forget a single URL so the next fetch goes to the network
    pub async fn invalidate(&self, url: &str) {
        self.entries.invalidate(url).await;
    }

    /// Forget everything, like a page reload
    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }

    /// Whether a payload for `url` is currently stored
    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            entries: self.entries.entry_count(),
        }
    }

    async fn load(&self, url: &str) -> Result<Payload, FetchError> {
        debug!(%url, "Fetching from network");
        FetchError::interpret(self.transport.get(url).await).map(Arc::new)
    }
}

#[async_trait]
impl FetchPort for FetchCache {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Option<Payload> {
        let loaded = AtomicBool::new(false);
        let result = self
            .entries
            .try_get_with_by_ref(url, async {
                loaded.store(true, Ordering::Relaxed);
                self.load(url).await
            })
            .await;

        if loaded.load(Ordering::Relaxed) {
            self.misses.fetch_add(1, Ordering::Relaxed);
        } else {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }

        match result {
            Ok(payload) => Some(payload),
            Err(e) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                warn!(%url, error = %e, "Fetch failed");
                self.errors.set(e.to_string());
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use application::{ApplicationError, HttpReply};
    use async_trait::async_trait;
    use parking_lot::Mutex;

    use super::*;

    /// Replays queued replies in order
    struct ScriptedTransport {
        replies: Mutex<Vec<Result<HttpReply, ApplicationError>>>,
    }

    impl ScriptedTransport {
        fn new(mut replies: Vec<Result<HttpReply, ApplicationError>>) -> Arc<Self> {
            replies.reverse();
            Arc::new(Self {
                replies: Mutex::new(replies),
            })
        }
    }

    #[async_trait]
    impl HttpTransportPort for ScriptedTransport {
        async fn get(&self, _url: &str) -> Result<HttpReply, ApplicationError> {
            self.replies
                .lock()
                .pop()
                .unwrap_or_else(|| Err(ApplicationError::Internal("script exhausted".into())))
        }
    }

    #[tokio::test]
    async fn success_is_memoized() {
        let transport = ScriptedTransport::new(vec![Ok(HttpReply::new(200, r#"{"v":1}"#))]);
        let cache = FetchCache::new(transport, ErrorSlot::shared());

        let first = cache.fetch("/api/a").await.unwrap();
        let second = cache.fetch("/api/a").await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
        assert!(cache.contains("/api/a"));
    }

    #[tokio::test]
    async fn errors_are_reported_and_not_cached() {
        let transport = ScriptedTransport::new(vec![
            Ok(HttpReply::new(503, "")),
            Ok(HttpReply::new(200, "[]")),
        ]);
        let errors = ErrorSlot::shared();
        let cache = FetchCache::new(transport, Arc::clone(&errors));

        assert!(cache.fetch("/api/a").await.is_none());
        assert_eq!(
            errors.get().as_deref(),
            Some("The service is temporarily unavailable. Please try again later.")
        );
        assert!(!cache.contains("/api/a"));

        assert!(cache.fetch("/api/a").await.is_some());
        assert_eq!(cache.stats().misses, 2);
        assert_eq!(cache.stats().failures, 1);
    }

    #[tokio::test]
    async fn malformed_body_is_reported() {
        let transport = ScriptedTransport::new(vec![Ok(HttpReply::new(200, "<!doctype html>"))]);
        let errors = ErrorSlot::shared();
        let cache = FetchCache::new(transport, Arc::clone(&errors));

        assert!(cache.fetch("/api/a").await.is_none());
        assert!(errors.get().unwrap().starts_with("The server sent malformed content"));
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let transport = ScriptedTransport::new(vec![
            Ok(HttpReply::new(200, "1")),
            Ok(HttpReply::new(200, "2")),
        ]);
        let cache = FetchCache::new(transport, ErrorSlot::shared());

        assert_eq!(*cache.fetch("/x").await.unwrap(), serde_json::json!(1));
        cache.invalidate("/x").await;
        assert_eq!(*cache.fetch("/x").await.unwrap(), serde_json::json!(2));
    }

    #[test]
    fn debug_shows_counters() {
        let cache = FetchCache::new(ScriptedTransport::new(Vec::new()), ErrorSlot::shared());
        let debug = format!("{cache:?}");
        assert!(debug.contains("FetchCache"));
        assert!(debug.contains("hits"));
    }
}
