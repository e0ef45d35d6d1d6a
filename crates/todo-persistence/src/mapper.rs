//! Typed record mapper.
//!
//! Translates raw store rows into domain records and domain values into
//! store parameters, going through the codec registry for every enum
//! column. A row is never partially decoded: the first failing column
//! aborts the whole row and the error propagates unchanged.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use todo_domain::{TodoCategory, TodoDraft, TodoRecord, TodoStatus};

use crate::codec::{CodecRegistry, EnumCode};
use crate::error::{PersistenceError, Result};
use crate::store::{ColumnValue, RawRow, RowParams, TodoStore};

/// Row entity name used in row-shape errors.
const ENTITY: &str = "todo";

/// Mapper between raw todo rows and typed records.
#[derive(Clone)]
pub struct TodoMapper {
    store: Arc<dyn TodoStore>,
    registry: Arc<CodecRegistry>,
}

impl TodoMapper {
    pub fn new(store: Arc<dyn TodoStore>, registry: Arc<CodecRegistry>) -> Self {
        Self { store, registry }
    }

    /// All records, ordered by id ascending.
    pub async fn find_all(&self) -> Result<Vec<TodoRecord>> {
        let rows = self.store.select_all().await?;
        rows.iter().map(|row| self.decode_row(row)).collect()
    }

    /// Record by primary key.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<TodoRecord>> {
        let row = self.store.select_by_id(id).await?;
        row.as_ref().map(|row| self.decode_row(row)).transpose()
    }

    /// Insert a draft; id and timestamps are assigned by the store.
    pub async fn insert(&self, draft: &TodoDraft) -> Result<u64> {
        let mut params = RowParams::new();
        params.set("title", ColumnValue::Text(draft.title.clone()));
        params.set(
            "description",
            draft
                .description
                .clone()
                .map_or(ColumnValue::Null, ColumnValue::Text),
        );
        params.set("status", code_column(self.registry.encode(draft.status)?));
        params.set(
            "category",
            code_column(self.registry.encode(draft.category)?),
        );
        self.store.insert(params).await
    }

    /// Update the status of one record.
    pub async fn update_status_by_id(&self, id: i64, status: TodoStatus) -> Result<u64> {
        let code = self.registry.encode(status)?;
        self.store.update_status(id, code_column(code)).await
    }

    /// Delete one record.
    pub async fn delete_by_id(&self, id: i64) -> Result<u64> {
        self.store.delete(id).await
    }

    fn decode_row(&self, row: &RawRow) -> Result<TodoRecord> {
        let status: TodoStatus = self.registry.decode(&enum_code_column(row, "status")?)?;
        let category: TodoCategory = self.registry.decode(&enum_code_column(row, "category")?)?;

        Ok(TodoRecord {
            id: int_column(row, "id")?,
            title: text_column(row, "title")?,
            description: opt_text_column(row, "description")?,
            status,
            category,
            created_at: timestamp_column(row, "created_at")?,
            updated_at: timestamp_column(row, "updated_at")?,
        })
    }
}

fn code_column(code: EnumCode) -> ColumnValue {
    match code {
        EnumCode::Int(value) => ColumnValue::Int(value),
        EnumCode::Text(value) => ColumnValue::Text(value),
    }
}

fn require_column<'a>(row: &'a RawRow, column: &'static str) -> Result<&'a ColumnValue> {
    row.get(column).ok_or(PersistenceError::MissingColumn {
        entity: ENTITY,
        column,
    })
}

fn column_type(
    column: &'static str,
    expected: &'static str,
    found: &ColumnValue,
) -> PersistenceError {
    PersistenceError::ColumnType {
        column,
        expected,
        found: found.kind(),
    }
}

fn int_column(row: &RawRow, column: &'static str) -> Result<i64> {
    match require_column(row, column)? {
        ColumnValue::Int(value) => Ok(*value),
        other => Err(column_type(column, "int", other)),
    }
}

fn text_column(row: &RawRow, column: &'static str) -> Result<String> {
    match require_column(row, column)? {
        ColumnValue::Text(value) => Ok(value.clone()),
        other => Err(column_type(column, "text", other)),
    }
}

fn opt_text_column(row: &RawRow, column: &'static str) -> Result<Option<String>> {
    match require_column(row, column)? {
        ColumnValue::Null => Ok(None),
        ColumnValue::Text(value) => Ok(Some(value.clone())),
        other => Err(column_type(column, "text or null", other)),
    }
}

fn timestamp_column(row: &RawRow, column: &'static str) -> Result<DateTime<Utc>> {
    match require_column(row, column)? {
        ColumnValue::Timestamp(value) => Ok(*value),
        other => Err(column_type(column, "timestamp", other)),
    }
}

fn enum_code_column(row: &RawRow, column: &'static str) -> Result<EnumCode> {
    match require_column(row, column)? {
        ColumnValue::Int(value) => Ok(EnumCode::Int(*value)),
        ColumnValue::Text(value) => Ok(EnumCode::Text(value.clone())),
        other => Err(column_type(column, "enum code", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{CodecError, domain_codecs};
    use crate::store::MemoryTodoStore;

    fn mapper_over(store: Arc<dyn TodoStore>) -> TodoMapper {
        TodoMapper::new(store, Arc::new(domain_codecs().unwrap()))
    }

    fn draft(title: &str, status: TodoStatus, category: TodoCategory) -> TodoDraft {
        TodoDraft {
            title: title.to_string(),
            description: Some(format!("description for {title}")),
            status,
            category,
        }
    }

    fn row(id: i64, status: i64, category: &str) -> RawRow {
        RawRow::new()
            .with("id", ColumnValue::Int(id))
            .with("title", ColumnValue::Text(format!("Task {id}")))
            .with("description", ColumnValue::Null)
            .with("status", ColumnValue::Int(status))
            .with("category", ColumnValue::Text(category.to_string()))
            .with("created_at", ColumnValue::Timestamp(Utc::now()))
            .with("updated_at", ColumnValue::Timestamp(Utc::now()))
    }

    #[tokio::test]
    async fn insert_then_find_round_trips_enum_columns() {
        let mapper = mapper_over(Arc::new(MemoryTodoStore::new()));
        let draft = draft("Task insert", TodoStatus::Doing, TodoCategory::Hobby);

        assert_eq!(mapper.insert(&draft).await.unwrap(), 1);

        let record = mapper.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(record.title, draft.title);
        assert_eq!(record.description, draft.description);
        assert_eq!(record.status, TodoStatus::Doing);
        assert_eq!(record.category, TodoCategory::Hobby);
    }

    #[tokio::test]
    async fn find_all_preserves_store_order() {
        let mapper = mapper_over(Arc::new(MemoryTodoStore::new()));
        for title in ["Task 1", "Task 2", "Task 3"] {
            mapper
                .insert(&draft(title, TodoStatus::Todo, TodoCategory::Work))
                .await
                .unwrap();
        }

        let records = mapper.find_all().await.unwrap();
        let ids: Vec<i64> = records.iter().map(|record| record.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn undeclared_code_aborts_the_whole_row() {
        let store = MemoryTodoStore::new();
        store
            .insert({
                let mut params = RowParams::new();
                params.set("title", ColumnValue::Text("bad".to_string()));
                params.set("description", ColumnValue::Null);
                params.set("status", ColumnValue::Int(9));
                params.set("category", ColumnValue::Text("work".to_string()));
                params
            })
            .await
            .unwrap();

        let mapper = mapper_over(Arc::new(store));
        let err = mapper.find_by_id(1).await.unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::Codec(CodecError::UnknownCode { .. })
        ));
    }

    #[tokio::test]
    async fn one_bad_row_fails_the_whole_listing() {
        let store = Arc::new(MemoryTodoStore::new());
        let mapper = mapper_over(store.clone());
        mapper
            .insert(&draft("good", TodoStatus::Todo, TodoCategory::Work))
            .await
            .unwrap();

        // second row carries a token no codec declares
        let mut params = RowParams::new();
        params.set("title", ColumnValue::Text("bad".to_string()));
        params.set("description", ColumnValue::Null);
        params.set("status", ColumnValue::Int(1));
        params.set("category", ColumnValue::Text("garden".to_string()));
        store.insert(params).await.unwrap();

        assert!(mapper.find_all().await.is_err());
    }

    #[test]
    fn decode_row_materializes_every_field() {
        let mapper = mapper_over(Arc::new(MemoryTodoStore::new()));
        let record = mapper.decode_row(&row(4, 2, "private")).unwrap();
        assert_eq!(record.id, 4);
        assert_eq!(record.status, TodoStatus::Doing);
        assert_eq!(record.category, TodoCategory::Private);
        assert_eq!(record.description, None);
    }

    #[test]
    fn missing_column_is_a_row_shape_error() {
        let mapper = mapper_over(Arc::new(MemoryTodoStore::new()));
        let row = RawRow::new().with("id", ColumnValue::Int(1));
        assert!(matches!(
            mapper.decode_row(&row).unwrap_err(),
            PersistenceError::MissingColumn { .. }
        ));
    }
}
