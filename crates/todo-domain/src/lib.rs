//! # Todo Records - Domain Model
//!
//! Core domain entities and coded enums for the todo record-management
//! backend. These types are the single source of truth across the
//! persistence and service layers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// CODED ENUM CAPABILITIES
// =============================================================================

/// Enum persisted as a small integer column.
///
/// The code of each variant is part of the stored-data contract and must
/// stay stable across deployments; changing a code without a migration
/// breaks decoding of existing rows.
pub trait IntCoded: Copy + Eq + 'static {
    /// All declared variants, in declaration order.
    const VARIANTS: &'static [Self];

    /// Stable integer code persisted for this variant.
    fn code(self) -> i64;

    /// Resolve a persisted code back to its variant.
    fn from_code(code: i64) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.code() == code)
    }
}

/// Enum persisted as a lowercase ASCII token column.
///
/// Same stability contract as [`IntCoded`].
pub trait TextCoded: Copy + Eq + 'static {
    /// All declared variants, in declaration order.
    const VARIANTS: &'static [Self];

    /// Stable token persisted for this variant.
    fn token(self) -> &'static str;

    /// Resolve a persisted token back to its variant.
    fn from_token(token: &str) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.token() == token)
    }
}

// =============================================================================
// ENUMS
// =============================================================================

/// Workflow state of a todo record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoStatus {
    Todo,
    Doing,
    Done,
}

impl TodoStatus {
    /// Human-readable label shown to clients.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Done => "done",
        }
    }

    /// Resolve an inbound wire code, rejecting undeclared ones.
    pub fn resolve(code: i64) -> Result<Self, DomainError> {
        Self::from_code(code).ok_or(DomainError::UnknownStatusCode(code))
    }
}

impl IntCoded for TodoStatus {
    const VARIANTS: &'static [Self] = &[Self::Todo, Self::Doing, Self::Done];

    fn code(self) -> i64 {
        match self {
            Self::Todo => 1,
            Self::Doing => 2,
            Self::Done => 3,
        }
    }
}

/// Classification of a todo record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoCategory {
    Work,
    Private,
    Hobby,
    Other,
}

impl TodoCategory {
    /// Resolve an inbound wire token, rejecting undeclared ones.
    pub fn resolve(token: &str) -> Result<Self, DomainError> {
        Self::from_token(token).ok_or_else(|| DomainError::UnknownCategoryToken(token.to_string()))
    }
}

impl TextCoded for TodoCategory {
    const VARIANTS: &'static [Self] = &[Self::Work, Self::Private, Self::Hobby, Self::Other];

    fn token(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Private => "private",
            Self::Hobby => "hobby",
            Self::Other => "other",
        }
    }
}

// =============================================================================
// ENTITY TYPES
// =============================================================================

/// Todo entity as materialized from the data store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoRecord {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: TodoStatus,
    pub category: TodoCategory,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload; id and timestamps are assigned by the data store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoDraft {
    pub title: String,
    pub description: Option<String>,
    pub status: TodoStatus,
    pub category: TodoCategory,
}

// =============================================================================
// ERRORS
// =============================================================================

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("unknown status code: {0}")]
    UnknownStatusCode(i64),

    #[error("unknown category token: {0}")]
    UnknownCategoryToken(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_round_trip() {
        for status in TodoStatus::VARIANTS {
            assert_eq!(TodoStatus::from_code(status.code()), Some(*status));
        }
    }

    #[test]
    fn category_tokens_round_trip() {
        for category in TodoCategory::VARIANTS {
            assert_eq!(TodoCategory::from_token(category.token()), Some(*category));
        }
    }

    #[test]
    fn resolve_rejects_undeclared_values() {
        assert_eq!(
            TodoStatus::resolve(9),
            Err(DomainError::UnknownStatusCode(9))
        );
        assert_eq!(
            TodoCategory::resolve("garden"),
            Err(DomainError::UnknownCategoryToken("garden".to_string()))
        );
    }

    #[test]
    fn status_labels() {
        assert_eq!(TodoStatus::Doing.label(), "doing");
    }
}
