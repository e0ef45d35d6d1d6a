//! # Todo Service
//!
//! Application service over the cache-aside repository. Inbound enum
//! fields arrive in wire form (integer status codes, category tokens) and
//! are resolved to variants before anything touches the store; write
//! outcomes are logged and reported as affected-row booleans.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use std::sync::Arc;

use thiserror::Error;
use todo_domain::{DomainError, TodoCategory, TodoDraft, TodoRecord, TodoStatus};
use todo_persistence::{PersistenceError, TodoRepository};

/// Service-level errors
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Inbound create request with enum fields still in wire form.
#[derive(Debug, Clone)]
pub struct CreateTodo {
    pub title: String,
    pub description: Option<String>,
    pub status: i64,
    pub category: String,
}

/// Application service for todo records.
pub struct TodoService {
    repository: Arc<TodoRepository>,
}

impl TodoService {
    pub fn new(repository: Arc<TodoRepository>) -> Self {
        Self { repository }
    }

    /// Full listing, served through the cache.
    pub async fn todo_list(&self) -> Result<Vec<TodoRecord>> {
        let list = self.repository.find_all().await?;
        tracing::debug!(count = list.len(), "fetched todo list");
        Ok(list)
    }

    /// Single record, served through the cache.
    pub async fn todo_detail(&self, id: i64) -> Result<Option<TodoRecord>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Create a record from wire-form input; unknown status or category
    /// codes are rejected before the store is touched.
    pub async fn create_todo(&self, input: CreateTodo) -> Result<bool> {
        let draft = TodoDraft {
            title: input.title,
            description: input.description,
            status: TodoStatus::resolve(input.status)?,
            category: TodoCategory::resolve(&input.category)?,
        };

        let created = self.repository.insert(&draft).await? > 0;
        if created {
            tracing::info!(title = %draft.title, "todo created");
        } else {
            tracing::error!(title = %draft.title, "failed to create todo");
        }
        Ok(created)
    }

    /// Move a record to a new status given its wire code.
    pub async fn update_status(&self, id: i64, status: i64) -> Result<bool> {
        let status = TodoStatus::resolve(status)?;
        let updated = self.repository.update_status_by_id(id, status).await? > 0;
        if updated {
            tracing::info!(id, status = status.label(), "todo status updated");
        } else {
            tracing::error!(id, status = status.label(), "failed to update todo status");
        }
        Ok(updated)
    }

    /// Remove a record.
    pub async fn delete_todo(&self, id: i64) -> Result<bool> {
        let deleted = self.repository.delete_by_id(id).await? > 0;
        if deleted {
            tracing::info!(id, "todo deleted");
        } else {
            tracing::error!(id, "failed to delete todo");
        }
        Ok(deleted)
    }
}
