//! Cache-aside todo repository.
//!
//! Reads go cache-first with the data store as the source of truth;
//! writes go straight to the data store and leave existing cache entries
//! to expire on their own, so reads may be up to the configured TTL stale
//! relative to the latest write.

use std::sync::Arc;
use std::time::Duration;

use todo_domain::{TodoDraft, TodoRecord, TodoStatus};

use super::cache_aside::CacheAside;
use crate::cache::{CacheKey, CacheStore};
use crate::error::Result;
use crate::mapper::TodoMapper;

/// Namespace prefixed to every cache key produced by this repository.
const NAMESPACE: &str = "TodoRepository";

/// Repository for todo records.
pub struct TodoRepository {
    mapper: TodoMapper,
    cache: CacheAside,
}

impl TodoRepository {
    pub fn new(mapper: TodoMapper, cache_store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self {
            mapper,
            cache: CacheAside::new(cache_store, ttl),
        }
    }

    /// All records, ordered by id ascending.
    pub async fn find_all(&self) -> Result<Vec<TodoRecord>> {
        let key = CacheKey::for_operation(NAMESPACE, "findAll");
        self.cache.get_or_load(&key, || self.mapper.find_all()).await
    }

    /// Record by id; a missing record is cached as an absence.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<TodoRecord>> {
        let key = CacheKey::for_argument(NAMESPACE, "findById", id);
        self.cache
            .get_or_load(&key, || self.mapper.find_by_id(id))
            .await
    }

    /// Insert a draft. No cache interaction: a cached listing keeps
    /// serving until its TTL elapses.
    pub async fn insert(&self, draft: &TodoDraft) -> Result<u64> {
        self.mapper.insert(draft).await
    }

    /// Update the status of one record, bypassing the cache.
    pub async fn update_status_by_id(&self, id: i64, status: TodoStatus) -> Result<u64> {
        self.mapper.update_status_by_id(id, status).await
    }

    /// Delete one record, bypassing the cache.
    pub async fn delete_by_id(&self, id: i64) -> Result<u64> {
        self.mapper.delete_by_id(id).await
    }
}
