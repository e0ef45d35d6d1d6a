//! # Cache Store Module
//!
//! Byte-payload cache boundary and the deterministic key scheme used by
//! the repository layer.

pub mod memory;
#[cfg(feature = "redis")]
pub mod redis_store;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheStoreError;

pub use memory::MemoryCacheStore;
#[cfg(feature = "redis")]
pub use redis_store::{CacheConfig, RedisCacheStore};

/// Byte-payload cache with TTL support.
///
/// Failures are transient by contract: callers fall back to the data
/// store instead of surfacing them.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch the payload stored under `key`, if an unexpired entry exists.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheStoreError>;

    /// Store `payload` under `key`, replacing any existing entry
    /// wholesale, expiring after `ttl`.
    async fn set(&self, key: &str, payload: &[u8], ttl: Duration) -> Result<(), CacheStoreError>;
}

/// Deterministic cache key.
///
/// `<Namespace>.<operation>` for no-argument reads,
/// `<Namespace>.<operation>::<argument>` for single-key reads. Identical
/// calls always produce the identical key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    #[must_use]
    pub fn for_operation(namespace: &str, operation: &str) -> Self {
        Self(format!("{namespace}.{operation}"))
    }

    #[must_use]
    pub fn for_argument(namespace: &str, operation: &str, argument: impl fmt::Display) -> Self {
        Self(format!("{namespace}.{operation}::{argument}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_key_format() {
        let key = CacheKey::for_operation("TodoRepository", "findAll");
        assert_eq!(key.as_str(), "TodoRepository.findAll");
    }

    #[test]
    fn argument_key_format() {
        let key = CacheKey::for_argument("TodoRepository", "findById", 42);
        assert_eq!(key.as_str(), "TodoRepository.findById::42");
    }

    #[test]
    fn identical_arguments_yield_identical_keys() {
        assert_eq!(
            CacheKey::for_argument("TodoRepository", "findById", 7),
            CacheKey::for_argument("TodoRepository", "findById", 7)
        );
        assert_ne!(
            CacheKey::for_argument("TodoRepository", "findById", 7),
            CacheKey::for_argument("TodoRepository", "findById", 8)
        );
    }
}
