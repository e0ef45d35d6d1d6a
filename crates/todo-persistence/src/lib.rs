//! # Todo Persistence Library
//!
//! Typed persistence layer for the todo record-management backend.
//!
//! ## Architecture
//!
//! Enum columns travel through per-type codecs looked up in an immutable
//! registry; reads travel through a cache-aside decorator in front of the
//! data store:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Application Layer                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TodoRepository                          │
//! │          (cache-aside reads, direct writes, no               │
//! │                   cache invalidation)                        │
//! └─────────────────────────────────────────────────────────────┘
//!                    │                   │
//!                    ▼                   ▼
//! ┌─────────────────────────┐   ┌──────────────────────────────┐
//! │      Cache Store        │   │   TodoMapper + CodecRegistry │
//! │   (Redis, byte payload  │   │     over the Data Store      │
//! │      entries + TTL)     │   │      (Source of Truth)       │
//! └─────────────────────────┘   └──────────────────────────────┘
//! ```
//!
//! Consistency model: bounded staleness. Reads may observe data up to
//! the configured TTL stale relative to the most recent write.
//!
//! ## Features
//!
//! - `redis`: Enable the Redis cache store adapter (default)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use todo_persistence::{
//!     CacheConfig, RedisCacheStore, TodoMapper, TodoRepository, domain_codecs,
//! };
//!
//! let config = CacheConfig::default();
//! let cache = RedisCacheStore::new(&config).await?;
//! let registry = Arc::new(domain_codecs()?);
//! let mapper = TodoMapper::new(store, registry);
//! let repository = TodoRepository::new(mapper, Arc::new(cache), config.ttl);
//!
//! let todos = repository.find_all().await?;
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod codec;
pub mod error;
pub mod mapper;
pub mod payload;
pub mod repository;
pub mod store;

// Re-export commonly used types
#[cfg(feature = "redis")]
pub use cache::{CacheConfig, RedisCacheStore};
pub use cache::{CacheKey, CacheStore, MemoryCacheStore};
pub use codec::{
    CodecError, CodecRegistry, EnumCode, EnumCodec, IntEnumCodec, TextEnumCodec, domain_codecs,
};
pub use error::{CacheStoreError, PersistenceError, Result};
pub use mapper::TodoMapper;
pub use payload::{CachePayload, CachedValue};
pub use repository::{CacheAside, TodoRepository};
pub use store::{ColumnValue, MemoryTodoStore, RawRow, RowParams, TodoStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
