//! Redis cache store adapter.
//!
//! Connection-manager backed client; every operation clones the manager,
//! which multiplexes over one shared connection.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use super::CacheStore;
use crate::error::CacheStoreError;

/// Redis cache configuration.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub url: String,
    /// Uniform TTL applied to every entry written by this layer.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            ttl: Duration::from_secs(60),
        }
    }
}

/// Cache store backed by a shared Redis connection manager.
#[derive(Clone)]
pub struct RedisCacheStore {
    conn: ConnectionManager,
}

impl RedisCacheStore {
    /// Connect to Redis.
    pub async fn new(config: &CacheConfig) -> Result<Self, CacheStoreError> {
        let client = Client::open(config.url.as_str())?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheStoreError> {
        let mut conn = self.conn.clone();
        let payload: Option<Vec<u8>> = conn.get(key).await?;
        Ok(payload)
    }

    async fn set(
        &self,
        key: &str,
        payload: &[u8],
        ttl: Duration,
    ) -> Result<(), CacheStoreError> {
        let mut conn = self.conn.clone();
        let _: () = conn.set_ex(key, payload, ttl.as_secs()).await?;
        Ok(())
    }
}
