//! Polymorphic cache payload serializer.
//!
//! A lone record and a one-element collection would be ambiguous on the
//! wire, so every payload carries an explicit shape discriminator next to
//! the field data. Records serialize with their concrete enum variants,
//! making a decoded payload indistinguishable from a fresh load.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{PersistenceError, Result};

/// Cached value with its runtime shape made explicit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "value", rename_all = "snake_case")]
pub enum CachedValue<R> {
    /// A single optional record; a `None` is a cacheable absence.
    Single(Option<R>),
    /// An ordered collection of records.
    Collection(Vec<R>),
}

impl<R> CachedValue<R> {
    /// Shape tag, for error reporting.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Single(_) => "single",
            Self::Collection(_) => "collection",
        }
    }
}

/// Conversion between a query result and its cached representation.
///
/// Implemented for the two result shapes the repository serves:
/// `Option<R>` and `Vec<R>`.
pub trait CachePayload: Sized {
    type Record: Serialize + DeserializeOwned + Clone;

    fn to_value(&self) -> CachedValue<Self::Record>;

    /// Rejects payloads whose shape does not match the requested result
    /// type; a mismatch means the entry is corrupt.
    fn from_value(value: CachedValue<Self::Record>) -> Result<Self>;
}

impl<R: Serialize + DeserializeOwned + Clone> CachePayload for Option<R> {
    type Record = R;

    fn to_value(&self) -> CachedValue<R> {
        CachedValue::Single(self.clone())
    }

    fn from_value(value: CachedValue<R>) -> Result<Self> {
        match value {
            CachedValue::Single(record) => Ok(record),
            other => Err(PersistenceError::PayloadShape {
                expected: "single",
                found: other.shape(),
            }),
        }
    }
}

impl<R: Serialize + DeserializeOwned + Clone> CachePayload for Vec<R> {
    type Record = R;

    fn to_value(&self) -> CachedValue<R> {
        CachedValue::Collection(self.clone())
    }

    fn from_value(value: CachedValue<R>) -> Result<Self> {
        match value {
            CachedValue::Collection(records) => Ok(records),
            other => Err(PersistenceError::PayloadShape {
                expected: "collection",
                found: other.shape(),
            }),
        }
    }
}

/// Serialize a query result into payload bytes.
pub fn encode_payload<T: CachePayload>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&value.to_value())?)
}

/// Deserialize payload bytes back into the requested result type.
pub fn decode_payload<T: CachePayload>(bytes: &[u8]) -> Result<T> {
    let value: CachedValue<T::Record> = serde_json::from_slice(bytes)?;
    T::from_value(value)
}
