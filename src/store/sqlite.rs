//! SQLite-based todo store.

use super::{now_string, Todo, TodoStore, UpdateTodo};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, ToSql};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

const SCHEMA: &str = r#"
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS todos (
    id TEXT PRIMARY KEY NOT NULL,
    text TEXT NOT NULL,
    completed INTEGER NOT NULL DEFAULT 0,
    position INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_todos_position ON todos(position);
"#;

const TODO_COLUMNS: &str = "id, text, completed, position, created_at, updated_at";

pub struct SqliteTodoStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteTodoStore {
    pub async fn new(data_dir: PathBuf) -> Result<Self, String> {
        let db_path = data_dir.join("todos.db");

        tokio::fs::create_dir_all(&data_dir)
            .await
            .map_err(|e| format!("Failed to create data dir: {}", e))?;

        let conn = tokio::task::spawn_blocking(move || {
            let conn = Connection::open(&db_path)
                .map_err(|e| format!("Failed to open SQLite database: {}", e))?;

            conn.execute_batch(SCHEMA)
                .map_err(|e| format!("Failed to run schema: {}", e))?;

            Ok::<_, String>(conn)
        })
        .await
        .map_err(|e| format!("Task join error: {}", e))??;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

fn row_to_todo(row: &rusqlite::Row<'_>) -> rusqlite::Result<Todo> {
    let id_str: String = row.get(0)?;
    Ok(Todo {
        id: Uuid::parse_str(&id_str).unwrap_or_default(),
        text: row.get(1)?,
        completed: row.get::<_, i64>(2)? != 0,
        position: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

#[async_trait]
impl TodoStore for SqliteTodoStore {
    fn is_persistent(&self) -> bool {
        true
    }

    async fn list_todos(&self) -> Result<Vec<Todo>, String> {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let conn = conn.blocking_lock();
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {} FROM todos ORDER BY position ASC",
                    TODO_COLUMNS
                ))
                .map_err(|e| e.to_string())?;

            let todos = stmt
                .query_map([], row_to_todo)
                .map_err(|e| e.to_string())?
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| e.to_string())?;

            Ok(todos)
        })
        .await
        .map_err(|e| format!("Task join error: {}", e))?
    }

    async fn get_todo(&self, id: Uuid) -> Result<Option<Todo>, String> {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let conn = conn.blocking_lock();
            conn.query_row(
                &format!("SELECT {} FROM todos WHERE id = ?1", TODO_COLUMNS),
                params![id.to_string()],
                row_to_todo,
            )
            .optional()
            .map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| format!("Task join error: {}", e))?
    }

    async fn create_todo(&self, text: &str) -> Result<Todo, String> {
        let conn = self.conn.clone();
        let text = text.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = conn.blocking_lock();
            let id = Uuid::new_v4();
            let now = now_string();

            // Single statement so the max-position read and the insert
            // cannot interleave with another writer.
            conn.execute(
                "INSERT INTO todos (id, text, completed, position, created_at, updated_at)
                 VALUES (?1, ?2, 0, (SELECT COALESCE(MAX(position) + 1, 0) FROM todos), ?3, ?3)",
                params![id.to_string(), text, now],
            )
            .map_err(|e| e.to_string())?;

            conn.query_row(
                &format!("SELECT {} FROM todos WHERE id = ?1", TODO_COLUMNS),
                params![id.to_string()],
                row_to_todo,
            )
            .map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| format!("Task join error: {}", e))?
    }

    async fn update_todo(&self, id: Uuid, patch: &UpdateTodo) -> Result<Option<Todo>, String> {
        let conn = self.conn.clone();
        let patch = patch.clone();
        tokio::task::spawn_blocking(move || {
            let conn = conn.blocking_lock();

            let mut assignments = vec!["updated_at = ?1".to_string()];
            let mut values: Vec<Box<dyn ToSql>> = vec![Box::new(now_string())];
            if let Some(text) = patch.text {
                values.push(Box::new(text));
                assignments.push(format!("text = ?{}", values.len()));
            }
            if let Some(completed) = patch.completed {
                values.push(Box::new(completed as i64));
                assignments.push(format!("completed = ?{}", values.len()));
            }
            if let Some(position) = patch.position {
                values.push(Box::new(position));
                assignments.push(format!("position = ?{}", values.len()));
            }
            values.push(Box::new(id.to_string()));

            let sql = format!(
                "UPDATE todos SET {} WHERE id = ?{}",
                assignments.join(", "),
                values.len()
            );
            let param_refs: Vec<&dyn ToSql> = values.iter().map(|v| v.as_ref()).collect();
            let affected = conn
                .execute(&sql, &param_refs[..])
                .map_err(|e| e.to_string())?;

            if affected == 0 {
                return Ok(None);
            }

            conn.query_row(
                &format!("SELECT {} FROM todos WHERE id = ?1", TODO_COLUMNS),
                params![id.to_string()],
                row_to_todo,
            )
            .optional()
            .map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| format!("Task join error: {}", e))?
    }

    async fn set_position(&self, id: Uuid, position: i64) -> Result<(), String> {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let conn = conn.blocking_lock();
            conn.execute(
                "UPDATE todos SET position = ?2, updated_at = ?3 WHERE id = ?1",
                params![id.to_string(), position, now_string()],
            )
            .map_err(|e| e.to_string())?;
            Ok(())
        })
        .await
        .map_err(|e| format!("Task join error: {}", e))?
    }

    async fn delete_todo(&self, id: Uuid) -> Result<bool, String> {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let conn = conn.blocking_lock();
            let affected = conn
                .execute("DELETE FROM todos WHERE id = ?1", params![id.to_string()])
                .map_err(|e| e.to_string())?;
            Ok(affected > 0)
        })
        .await
        .map_err(|e| format!("Task join error: {}", e))?
    }
}
