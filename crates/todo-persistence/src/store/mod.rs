//! # Data Store Module
//!
//! Source-of-truth boundary for todo rows. SQL execution, pooling, and
//! transactions live behind [`TodoStore`]; this layer only sees named
//! primitive columns. Implementations can be swapped for different
//! backends (MySQL, mock, etc.).

pub mod memory;

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;

pub use memory::MemoryTodoStore;

/// Primitive value of one row column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    Null,
    Int(i64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl ColumnValue {
    /// Name of the variant, for error reporting.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Int(_) => "int",
            Self::Text(_) => "text",
            Self::Timestamp(_) => "timestamp",
        }
    }
}

/// Untyped row as returned by the data store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    columns: HashMap<String, ColumnValue>,
}

impl RawRow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column, replacing any previous value under the same name.
    #[must_use]
    pub fn with(mut self, column: &str, value: ColumnValue) -> Self {
        self.columns.insert(column.to_string(), value);
        self
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&ColumnValue> {
        self.columns.get(column)
    }
}

/// Named parameters for an insert or update statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowParams {
    params: Vec<(&'static str, ColumnValue)>,
}

impl RowParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, column: &'static str, value: ColumnValue) {
        self.params.push((column, value));
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&ColumnValue> {
        self.params
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ColumnValue)> {
        self.params.iter().map(|(name, value)| (*name, value))
    }
}

/// Source-of-truth store for todo rows.
///
/// Rows come back untyped and are materialized by the mapper; writes
/// report the number of affected rows.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All rows, ordered by id ascending.
    async fn select_all(&self) -> Result<Vec<RawRow>>;

    /// Row by primary key.
    async fn select_by_id(&self, id: i64) -> Result<Option<RawRow>>;

    /// Insert a new row; the store assigns id and timestamps.
    async fn insert(&self, params: RowParams) -> Result<u64>;

    /// Update the status column of one row.
    async fn update_status(&self, id: i64, status: ColumnValue) -> Result<u64>;

    /// Delete a row by primary key.
    async fn delete(&self, id: i64) -> Result<u64>;
}
