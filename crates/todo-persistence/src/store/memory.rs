//! In-memory reference store.
//!
//! Assigns ids and timestamps the way the production schema does; used by
//! tests and local wiring.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::{ColumnValue, RawRow, RowParams, TodoStore};
use crate::error::{PersistenceError, Result};

/// Mutex-guarded row table with auto-increment ids.
#[derive(Debug, Default)]
pub struct MemoryTodoStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    rows: Vec<RawRow>,
}

impl MemoryTodoStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| PersistenceError::Store("memory store mutex poisoned".to_string()))
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn select_all(&self) -> Result<Vec<RawRow>> {
        Ok(self.locked()?.rows.clone())
    }

    async fn select_by_id(&self, id: i64) -> Result<Option<RawRow>> {
        Ok(self
            .locked()?
            .rows
            .iter()
            .find(|row| row_id(row) == Some(id))
            .cloned())
    }

    async fn insert(&self, params: RowParams) -> Result<u64> {
        let mut inner = self.locked()?;
        inner.next_id += 1;
        let now = Utc::now();
        let mut row = RawRow::new()
            .with("id", ColumnValue::Int(inner.next_id))
            .with("created_at", ColumnValue::Timestamp(now))
            .with("updated_at", ColumnValue::Timestamp(now));
        for (column, value) in params.iter() {
            row = row.with(column, value.clone());
        }
        inner.rows.push(row);
        Ok(1)
    }

    async fn update_status(&self, id: i64, status: ColumnValue) -> Result<u64> {
        let mut inner = self.locked()?;
        let Some(row) = inner.rows.iter_mut().find(|row| row_id(row) == Some(id)) else {
            return Ok(0);
        };
        *row = row
            .clone()
            .with("status", status)
            .with("updated_at", ColumnValue::Timestamp(Utc::now()));
        Ok(1)
    }

    async fn delete(&self, id: i64) -> Result<u64> {
        let mut inner = self.locked()?;
        let before = inner.rows.len();
        inner.rows.retain(|row| row_id(row) != Some(id));
        Ok((before - inner.rows.len()) as u64)
    }
}

fn row_id(row: &RawRow) -> Option<i64> {
    match row.get("id") {
        Some(ColumnValue::Int(id)) => Some(*id),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title_params(title: &str) -> RowParams {
        let mut params = RowParams::new();
        params.set("title", ColumnValue::Text(title.to_string()));
        params.set("status", ColumnValue::Int(1));
        params.set("category", ColumnValue::Text("work".to_string()));
        params
    }

    #[tokio::test]
    async fn insert_assigns_ascending_ids() {
        let store = MemoryTodoStore::new();
        assert_eq!(store.insert(title_params("first")).await.unwrap(), 1);
        assert_eq!(store.insert(title_params("second")).await.unwrap(), 1);

        let rows = store.select_all().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(row_id(&rows[0]), Some(1));
        assert_eq!(row_id(&rows[1]), Some(2));
    }

    #[tokio::test]
    async fn update_status_rewrites_the_row() {
        let store = MemoryTodoStore::new();
        store.insert(title_params("task")).await.unwrap();

        let affected = store.update_status(1, ColumnValue::Int(3)).await.unwrap();
        assert_eq!(affected, 1);

        let row = store.select_by_id(1).await.unwrap().unwrap();
        assert_eq!(row.get("status"), Some(&ColumnValue::Int(3)));
    }

    #[tokio::test]
    async fn update_of_missing_row_affects_nothing() {
        let store = MemoryTodoStore::new();
        let affected = store.update_status(7, ColumnValue::Int(2)).await.unwrap();
        assert_eq!(affected, 0);
    }

    #[tokio::test]
    async fn delete_removes_only_the_matching_row() {
        let store = MemoryTodoStore::new();
        store.insert(title_params("keep")).await.unwrap();
        store.insert(title_params("drop")).await.unwrap();

        assert_eq!(store.delete(2).await.unwrap(), 1);
        assert_eq!(store.delete(2).await.unwrap(), 0);

        let rows = store.select_all().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(row_id(&rows[0]), Some(1));
    }
}
