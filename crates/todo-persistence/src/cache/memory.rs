//! In-memory cache store honoring entry expiry; test double for Redis.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use async_trait::async_trait;

use super::CacheStore;
use crate::error::CacheStoreError;

/// Mutex-guarded entry table; expired entries are dropped lazily on read.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<String, Entry>>,
}

#[derive(Debug, Clone)]
struct Entry {
    payload: Vec<u8>,
    expires_at: Instant,
}

impl MemoryCacheStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every entry, expired or not.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    /// Number of unexpired entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .lock()
            .map(|entries| {
                entries
                    .values()
                    .filter(|entry| entry.expires_at > now)
                    .count()
            })
            .unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn locked(&self) -> Result<MutexGuard<'_, HashMap<String, Entry>>, CacheStoreError> {
        self.entries
            .lock()
            .map_err(|_| CacheStoreError("memory cache mutex poisoned".into()))
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheStoreError> {
        let mut entries = self.locked()?;
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Ok(Some(entry.payload.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(
        &self,
        key: &str,
        payload: &[u8],
        ttl: Duration,
    ) -> Result<(), CacheStoreError> {
        let entry = Entry {
            payload: payload.to_vec(),
            expires_at: Instant::now() + ttl,
        };
        self.locked()?.insert(key.to_string(), entry);
        Ok(())
    }
}
