//! Todo storage module with pluggable backends.
//!
//! Supports:
//! - `memory`: In-memory storage (non-persistent, for testing and ephemeral use)
//! - `sqlite`: SQLite database (the default)

mod memory;
mod sqlite;

pub use memory::InMemoryTodoStore;
pub use sqlite::SqliteTodoStore;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// A single TODO item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    pub id: Uuid,
    /// Trimmed, non-empty task text
    pub text: String,
    pub completed: bool,
    /// Manual ordering key; list order is ascending position
    pub position: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// A partial update applied to a todo. Unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

impl UpdateTodo {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.completed.is_none() && self.position.is_none()
    }
}

/// Get current timestamp as RFC3339 string.
pub fn now_string() -> String {
    Utc::now().to_rfc3339()
}

/// Todo store trait - implemented by all storage backends.
///
/// Errors are plain message strings; the API layer passes them through
/// to the client unmodified.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Whether this store persists data across restarts.
    fn is_persistent(&self) -> bool;

    /// List all todos, ordered by position ascending.
    async fn list_todos(&self) -> Result<Vec<Todo>, String>;

    /// Get a single todo by ID.
    async fn get_todo(&self, id: Uuid) -> Result<Option<Todo>, String>;

    /// Create a new todo. The position is one greater than the current
    /// maximum, or zero for the first todo. `text` must already be trimmed.
    async fn create_todo(&self, text: &str) -> Result<Todo, String>;

    /// Apply a partial update. Returns `None` when the todo does not exist.
    async fn update_todo(&self, id: Uuid, patch: &UpdateTodo) -> Result<Option<Todo>, String>;

    /// Set the position of a single todo. A no-op for unknown ids.
    async fn set_position(&self, id: Uuid, position: i64) -> Result<(), String>;

    /// Delete a todo. Returns `false` when nothing was deleted; an absent
    /// id is not an error.
    async fn delete_todo(&self, id: Uuid) -> Result<bool, String>;
}

/// Todo store type selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TodoStoreType {
    Memory,
    #[default]
    Sqlite,
}

impl TodoStoreType {
    /// Parse from environment variable value.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "memory" => Self::Memory,
            "sqlite" | "db" => Self::Sqlite,
            _ => Self::default(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Sqlite => "sqlite",
        }
    }
}

/// Create a todo store based on type and configuration.
pub async fn create_todo_store(
    store_type: TodoStoreType,
    data_dir: PathBuf,
) -> Result<Box<dyn TodoStore>, String> {
    match store_type {
        TodoStoreType::Memory => Ok(Box::new(InMemoryTodoStore::new())),
        TodoStoreType::Sqlite => {
            let store = SqliteTodoStore::new(data_dir).await?;
            Ok(Box::new(store))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sequential creates assign strictly increasing positions starting
    /// from zero.
    #[tokio::test]
    async fn create_assigns_contiguous_positions() {
        let store = InMemoryTodoStore::new();

        for expected in 0..4 {
            let todo = store
                .create_todo(&format!("task {}", expected))
                .await
                .expect("Failed to create todo");
            assert_eq!(todo.position, expected);
            assert!(!todo.completed);
        }
    }

    /// Position numbering resumes from the maximum, not from the count,
    /// after deletions punch holes in the sequence.
    #[tokio::test]
    async fn create_after_delete_continues_from_max() {
        let store = InMemoryTodoStore::new();

        let first = store.create_todo("first").await.unwrap();
        let _second = store.create_todo("second").await.unwrap();

        store.delete_todo(first.id).await.unwrap();

        let third = store.create_todo("third").await.unwrap();
        assert_eq!(third.position, 2);
    }

    #[tokio::test]
    async fn list_orders_by_position_ascending() {
        let store = InMemoryTodoStore::new();

        let a = store.create_todo("a").await.unwrap();
        let b = store.create_todo("b").await.unwrap();
        let c = store.create_todo("c").await.unwrap();

        // Scramble positions through single-row updates.
        store.set_position(b.id, 0).await.unwrap();
        store.set_position(a.id, 1).await.unwrap();
        store.set_position(c.id, 2).await.unwrap();

        let listed = store.list_todos().await.unwrap();
        let texts: Vec<&str> = listed.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["b", "a", "c"]);
        let positions: Vec<i64> = listed.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn partial_update_leaves_other_fields_alone() {
        let store = InMemoryTodoStore::new();
        let todo = store.create_todo("original").await.unwrap();

        let updated = store
            .update_todo(
                todo.id,
                &UpdateTodo {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .expect("Todo should exist");

        assert!(updated.completed);
        assert_eq!(updated.text, "original");
        assert_eq!(updated.position, todo.position);
    }

    #[tokio::test]
    async fn update_missing_todo_returns_none() {
        let store = InMemoryTodoStore::new();
        let result = store
            .update_todo(
                Uuid::new_v4(),
                &UpdateTodo {
                    text: Some("ghost".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }

    /// Deleting an absent id is not an error.
    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = InMemoryTodoStore::new();
        let todo = store.create_todo("doomed").await.unwrap();

        assert!(store.delete_todo(todo.id).await.unwrap());
        assert!(!store.delete_todo(todo.id).await.unwrap());
        assert!(!store.delete_todo(Uuid::new_v4()).await.unwrap());
    }

    #[tokio::test]
    async fn set_position_on_unknown_id_is_a_noop() {
        let store = InMemoryTodoStore::new();
        store.create_todo("only").await.unwrap();

        store.set_position(Uuid::new_v4(), 7).await.unwrap();

        let listed = store.list_todos().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].position, 0);
    }
}
