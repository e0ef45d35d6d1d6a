//! Persistence layer error types

use thiserror::Error;

use crate::codec::CodecError;

/// Persistence layer errors
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("data store error: {0}")]
    Store(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("row for {entity} is missing column {column}")]
    MissingColumn {
        entity: &'static str,
        column: &'static str,
    },

    #[error("column {column} holds {found}, expected {expected}")]
    ColumnType {
        column: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("cached payload has shape {found}, expected {expected}")]
    PayloadShape {
        expected: &'static str,
        found: &'static str,
    },
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Cache store failure.
///
/// Recovered locally by falling back to the data store, never surfaced to
/// callers.
#[derive(Debug, Error)]
#[error("cache store unavailable: {0}")]
pub struct CacheStoreError(#[from] pub Box<dyn std::error::Error + Send + Sync>);

#[cfg(feature = "redis")]
impl From<redis::RedisError> for CacheStoreError {
    fn from(err: redis::RedisError) -> Self {
        Self(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, PersistenceError>;
