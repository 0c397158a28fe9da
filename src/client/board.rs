//! In-memory view state over the todo list.
//!
//! Mirrors the frontend's state machine: an ordered cache of the list,
//! a completion filter, drag-and-drop reordering, and the
//! move-completed-to-top rule that applies only in the unfiltered view.
//! Mutations are optimistic; persistence happens after the local change.

use uuid::Uuid;

use super::TodoClient;
use crate::store::{Todo, UpdateTodo};

/// Completion filter over the cached list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub fn matches(&self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !todo.completed,
            Filter::Completed => todo.completed,
        }
    }
}

/// Outcome of toggling a todo's completion state.
#[derive(Debug, Clone)]
pub struct ToggleOutcome {
    /// The new completion value
    pub completed: bool,
    /// Full id order to persist when the toggle relocated the item
    pub reorder: Option<Vec<Uuid>>,
}

/// Ordered in-memory cache of the todo list.
#[derive(Debug, Default)]
pub struct TodoBoard {
    todos: Vec<Todo>,
}

impl TodoBoard {
    pub fn new(mut todos: Vec<Todo>) -> Self {
        todos.sort_by_key(|t| t.position);
        Self { todos }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// The current display order as ids, for persisting via reorder.
    pub fn id_order(&self) -> Vec<Uuid> {
        self.todos.iter().map(|t| t.id).collect()
    }

    /// Derived view for the given filter.
    pub fn visible(&self, filter: Filter) -> Vec<&Todo> {
        self.todos.iter().filter(|t| filter.matches(t)).collect()
    }

    /// Append a freshly created todo (server assigns the highest position).
    pub fn push(&mut self, todo: Todo) {
        self.todos.push(todo);
    }

    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.todos.len();
        self.todos.retain(|t| t.id != id);
        self.todos.len() != before
    }

    /// Drag-and-drop: remove the dragged item and reinsert it at the
    /// target's index. No-op when either id is unknown or they are equal.
    /// Returns the new full id order for persistence.
    pub fn move_item(&mut self, dragged: Uuid, target: Uuid) -> Option<Vec<Uuid>> {
        if dragged == target {
            return None;
        }
        let dragged_index = self.todos.iter().position(|t| t.id == dragged)?;
        let target_index = self.todos.iter().position(|t| t.id == target)?;

        let removed = self.todos.remove(dragged_index);
        self.todos.insert(target_index, removed);

        Some(self.id_order())
    }

    /// Flip a todo's completion state. In the unfiltered view, completing
    /// an item moves it to the top; un-completing never relocates.
    pub fn toggle(&mut self, id: Uuid, filter: Filter) -> Option<ToggleOutcome> {
        let index = self.todos.iter().position(|t| t.id == id)?;
        let completed = !self.todos[index].completed;
        self.todos[index].completed = completed;

        let reorder = if filter == Filter::All && completed {
            let item = self.todos.remove(index);
            self.todos.insert(0, item);
            Some(self.id_order())
        } else {
            None
        };

        Some(ToggleOutcome { completed, reorder })
    }
}

/// A client session: cached board + filter, persisting through the REST
/// adapter. Mutations update the board first; persistence failures are
/// logged and the local state is kept until the next full load.
pub struct TodoSession {
    client: TodoClient,
    board: TodoBoard,
    pub filter: Filter,
}

impl TodoSession {
    pub fn new(client: TodoClient) -> Self {
        Self {
            client,
            board: TodoBoard::default(),
            filter: Filter::All,
        }
    }

    pub fn board(&self) -> &TodoBoard {
        &self.board
    }

    pub fn visible(&self) -> Vec<&Todo> {
        self.board.visible(self.filter)
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Replace the cached list with the server's.
    pub async fn load(&mut self) -> anyhow::Result<()> {
        let todos = self.client.list_todos().await?;
        self.board = TodoBoard::new(todos);
        Ok(())
    }

    /// Create a todo. Empty-after-trim input is dropped without a request.
    pub async fn add(&mut self, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }
        match self.client.create_todo(trimmed).await {
            Ok(todo) => self.board.push(todo),
            Err(e) => tracing::warn!("Failed to create todo: {}", e),
        }
    }

    /// Toggle completion; persists the flip, and the relocation when the
    /// unfiltered view moved the item to the top.
    pub async fn toggle(&mut self, id: Uuid) {
        let Some(outcome) = self.board.toggle(id, self.filter) else {
            return;
        };

        let patch = UpdateTodo {
            completed: Some(outcome.completed),
            ..Default::default()
        };
        if let Err(e) = self.client.update_todo(id, &patch).await {
            tracing::warn!("Failed to persist completion toggle for {}: {}", id, e);
        }

        if let Some(order) = outcome.reorder {
            if let Err(e) = self.client.reorder(&order).await {
                tracing::warn!("Failed to persist toggle relocation: {}", e);
            }
        }
    }

    /// Delete a todo locally and on the server.
    pub async fn delete(&mut self, id: Uuid) {
        if !self.board.remove(id) {
            return;
        }
        if let Err(e) = self.client.delete_todo(id).await {
            tracing::warn!("Failed to delete todo {}: {}", id, e);
        }
    }

    /// Drag-and-drop reorder; persists the resulting order.
    pub async fn drag_drop(&mut self, dragged: Uuid, target: Uuid) {
        let Some(order) = self.board.move_item(dragged, target) else {
            return;
        };
        if let Err(e) = self.client.reorder(&order).await {
            tracing::warn!("Failed to persist reorder: {}", e);
        }
    }
}
