//! Read-through cache decorator.
//!
//! Cache-first reads with data-store fallback and populate-on-miss; one
//! uniform TTL for every entry written.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheKey, CacheStore};
use crate::error::Result;
use crate::payload::{CachePayload, decode_payload, encode_payload};

/// Cache-aside wrapper over a cache store.
#[derive(Clone)]
pub struct CacheAside {
    store: Arc<dyn CacheStore>,
    ttl: Duration,
}

impl CacheAside {
    pub fn new(store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Serve `key` from cache, or run `loader` and populate the entry.
    ///
    /// Cache failures on either side are logged and recovered by falling
    /// back to the loader; loader failures propagate and leave the cache
    /// untouched. Concurrent misses on one key are not deduplicated:
    /// each caller loads and the last populate wins.
    pub async fn get_or_load<T, F, Fut>(&self, key: &CacheKey, loader: F) -> Result<T>
    where
        T: CachePayload,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        match self.store.get(key.as_str()).await {
            Ok(Some(bytes)) => match decode_payload::<T>(&bytes) {
                Ok(value) => {
                    tracing::debug!(key = %key, "cache hit");
                    return Ok(value);
                }
                Err(error) => {
                    tracing::warn!(key = %key, %error, "discarding undecodable cache entry");
                }
            },
            Ok(None) => {
                tracing::debug!(key = %key, "cache miss");
            }
            Err(error) => {
                tracing::warn!(key = %key, %error, "cache store unavailable, falling back to data store");
            }
        }

        let loaded = loader().await?;

        match encode_payload(&loaded) {
            Ok(bytes) => {
                if let Err(error) = self.store.set(key.as_str(), &bytes, self.ttl).await {
                    tracing::warn!(key = %key, %error, "failed to populate cache");
                }
            }
            Err(error) => {
                tracing::warn!(key = %key, %error, "failed to encode cache payload");
            }
        }

        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCacheStore;
    use crate::error::{CacheStoreError, PersistenceError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct UnreachableCacheStore;

    #[async_trait]
    impl CacheStore for UnreachableCacheStore {
        async fn get(&self, _key: &str) -> std::result::Result<Option<Vec<u8>>, CacheStoreError> {
            Err(CacheStoreError("connection refused".into()))
        }

        async fn set(
            &self,
            _key: &str,
            _payload: &[u8],
            _ttl: Duration,
        ) -> std::result::Result<(), CacheStoreError> {
            Err(CacheStoreError("connection refused".into()))
        }
    }

    fn aside_with_ttl(ttl: Duration) -> (CacheAside, Arc<MemoryCacheStore>) {
        let store = Arc::new(MemoryCacheStore::new());
        (CacheAside::new(store.clone(), ttl), store)
    }

    fn key() -> CacheKey {
        CacheKey::for_operation("TodoRepository", "findAll")
    }

    #[tokio::test]
    async fn hit_serves_the_cached_value_without_the_loader() {
        let (aside, _) = aside_with_ttl(Duration::from_secs(5));
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            let value: Vec<i64> = aside
                .get_or_load(&key(), || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Ok(vec![1, 2]) }
                })
                .await
                .unwrap();
            assert_eq!(value, vec![1, 2]);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expiry_invokes_the_loader_again() {
        let (aside, _) = aside_with_ttl(Duration::from_millis(100));
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            let _: Vec<i64> = aside
                .get_or_load(&key(), || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Ok(vec![1]) }
                })
                .await
                .unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_millis(150)).await;

        let _: Vec<i64> = aside
            .get_or_load(&key(), || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(vec![1]) }
            })
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn absence_is_cached_like_any_other_value() {
        let (aside, _) = aside_with_ttl(Duration::from_secs(5));
        let calls = AtomicUsize::new(0);
        let key = CacheKey::for_argument("TodoRepository", "findById", 2);

        for _ in 0..2 {
            let value: Option<i64> = aside
                .get_or_load(&key, || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Ok(None) }
                })
                .await
                .unwrap();
            assert_eq!(value, None);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unreachable_cache_falls_back_to_the_loader() {
        let aside = CacheAside::new(Arc::new(UnreachableCacheStore), Duration::from_secs(5));

        let value: Vec<i64> = aside
            .get_or_load(&key(), || async { Ok(vec![9]) })
            .await
            .unwrap();

        assert_eq!(value, vec![9]);
    }

    #[tokio::test]
    async fn undecodable_entry_is_treated_as_a_miss() {
        let (aside, store) = aside_with_ttl(Duration::from_secs(5));
        store
            .set(key().as_str(), b"not json", Duration::from_secs(5))
            .await
            .unwrap();

        let value: Vec<i64> = aside
            .get_or_load(&key(), || async { Ok(vec![4]) })
            .await
            .unwrap();

        assert_eq!(value, vec![4]);
        // the fresh load overwrote the corrupt entry
        let value: Vec<i64> = aside
            .get_or_load(&key(), || async { Err(PersistenceError::Store("unused".into())) })
            .await
            .unwrap();
        assert_eq!(value, vec![4]);
    }

    #[tokio::test]
    async fn loader_failure_propagates_and_caches_nothing() {
        let (aside, store) = aside_with_ttl(Duration::from_secs(5));

        let result: Result<Vec<i64>> = aside
            .get_or_load(&key(), || async {
                Err(PersistenceError::Store("connection reset".into()))
            })
            .await;

        assert!(result.is_err());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn concurrent_misses_each_invoke_the_loader() {
        let (aside, _) = aside_with_ttl(Duration::from_secs(5));
        let barrier = Arc::new(tokio::sync::Barrier::new(2));

        let mut tasks = Vec::new();
        for _ in 0..2 {
            let aside = aside.clone();
            let barrier = barrier.clone();
            tasks.push(tokio::spawn(async move {
                aside
                    .get_or_load::<Vec<i64>, _, _>(&key(), || async move {
                        // releases only once both callers are inside their loaders
                        barrier.wait().await;
                        Ok(vec![1, 2])
                    })
                    .await
            }));
        }

        for task in tasks {
            assert_eq!(task.await.unwrap().unwrap(), vec![1, 2]);
        }
    }
}
