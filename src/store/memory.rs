//! In-memory todo store (non-persistent).

use super::{now_string, Todo, TodoStore, UpdateTodo};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone)]
pub struct InMemoryTodoStore {
    todos: Arc<RwLock<HashMap<Uuid, Todo>>>,
}

impl InMemoryTodoStore {
    pub fn new() -> Self {
        Self {
            todos: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryTodoStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TodoStore for InMemoryTodoStore {
    fn is_persistent(&self) -> bool {
        false
    }

    async fn list_todos(&self) -> Result<Vec<Todo>, String> {
        let mut todos: Vec<Todo> = self.todos.read().await.values().cloned().collect();
        todos.sort_by_key(|t| t.position);
        Ok(todos)
    }

    async fn get_todo(&self, id: Uuid) -> Result<Option<Todo>, String> {
        Ok(self.todos.read().await.get(&id).cloned())
    }

    async fn create_todo(&self, text: &str) -> Result<Todo, String> {
        let mut todos = self.todos.write().await;
        let position = todos
            .values()
            .map(|t| t.position + 1)
            .max()
            .unwrap_or(0);
        let now = now_string();
        let todo = Todo {
            id: Uuid::new_v4(),
            text: text.to_string(),
            completed: false,
            position,
            created_at: now.clone(),
            updated_at: now,
        };
        todos.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn update_todo(&self, id: Uuid, patch: &UpdateTodo) -> Result<Option<Todo>, String> {
        let mut todos = self.todos.write().await;
        let Some(todo) = todos.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(text) = &patch.text {
            todo.text = text.clone();
        }
        if let Some(completed) = patch.completed {
            todo.completed = completed;
        }
        if let Some(position) = patch.position {
            todo.position = position;
        }
        todo.updated_at = now_string();
        Ok(Some(todo.clone()))
    }

    async fn set_position(&self, id: Uuid, position: i64) -> Result<(), String> {
        let mut todos = self.todos.write().await;
        if let Some(todo) = todos.get_mut(&id) {
            todo.position = position;
            todo.updated_at = now_string();
        }
        Ok(())
    }

    async fn delete_todo(&self, id: Uuid) -> Result<bool, String> {
        Ok(self.todos.write().await.remove(&id).is_some())
    }
}
