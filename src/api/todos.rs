//! Todo collection and item endpoints.
//!
//! Implements the CRUD surface plus bulk reordering:
//! - List todos (ordered by position)
//! - Create todo (appends at the next position)
//! - Get / update / delete a single todo
//! - Reorder the whole list by id sequence

use axum::{
    extract::{Path as AxumPath, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
    Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;

use super::types::{CreateTodoRequest, MessageResponse, ReorderRequest, UpdateTodoRequest};
use crate::store::{Todo, UpdateTodo};

/// Create todo routes.
pub fn routes() -> Router<Arc<super::routes::AppState>> {
    Router::new()
        .route("/", get(list_todos))
        .route("/", post(create_todo))
        .route("/reorder", post(reorder_todos))
        .route("/:id", get(get_todo))
        .route("/:id", patch(update_todo))
        .route("/:id", delete(delete_todo))
}

fn internal_error(message: String) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, message)
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET /api/todos - List all todos, ordered by position ascending.
async fn list_todos(
    State(state): State<Arc<super::routes::AppState>>,
) -> Result<Json<Vec<Todo>>, (StatusCode, String)> {
    state
        .store
        .list_todos()
        .await
        .map(Json)
        .map_err(internal_error)
}

/// POST /api/todos - Create a new todo at the next position.
async fn create_todo(
    State(state): State<Arc<super::routes::AppState>>,
    Json(req): Json<CreateTodoRequest>,
) -> Result<(StatusCode, Json<Todo>), (StatusCode, String)> {
    let text = req.text.as_deref().unwrap_or("").trim().to_string();
    if text.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Text is required".to_string()));
    }

    let todo = state
        .store
        .create_todo(&text)
        .await
        .map_err(internal_error)?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// GET /api/todos/{id} - Get a single todo.
async fn get_todo(
    State(state): State<Arc<super::routes::AppState>>,
    AxumPath(id): AxumPath<Uuid>,
) -> Result<Json<Todo>, (StatusCode, String)> {
    match state.store.get_todo(id).await {
        Ok(Some(todo)) => Ok(Json(todo)),
        Ok(None) => Err((StatusCode::NOT_FOUND, format!("Todo {} not found", id))),
        Err(e) => Err(internal_error(e)),
    }
}

/// PATCH /api/todos/{id} - Apply a partial update.
async fn update_todo(
    State(state): State<Arc<super::routes::AppState>>,
    AxumPath(id): AxumPath<Uuid>,
    Json(req): Json<UpdateTodoRequest>,
) -> Result<Json<Todo>, (StatusCode, String)> {
    let mut patch = UpdateTodo::default();

    if let Some(text) = req.text {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err((StatusCode::BAD_REQUEST, "Text cannot be empty".to_string()));
        }
        patch.text = Some(trimmed.to_string());
    }
    patch.completed = req.completed;
    patch.position = req.position;

    if patch.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "No valid fields to update".to_string(),
        ));
    }

    match state.store.update_todo(id, &patch).await {
        Ok(Some(todo)) => Ok(Json(todo)),
        // The row is gone; surfaced as a store failure rather than 404
        // (the item GET is the only not-found endpoint).
        Ok(None) => Err(internal_error(format!("Todo {} not found", id))),
        Err(e) => Err(internal_error(e)),
    }
}

/// DELETE /api/todos/{id} - Delete a todo. Deleting an absent id still
/// reports success.
async fn delete_todo(
    State(state): State<Arc<super::routes::AppState>>,
    AxumPath(id): AxumPath<Uuid>,
) -> Result<Json<MessageResponse>, (StatusCode, String)> {
    let removed = state.store.delete_todo(id).await.map_err(internal_error)?;
    if !removed {
        tracing::debug!("Delete of absent todo {}", id);
    }
    Ok(Json(MessageResponse {
        message: "Todo deleted successfully".to_string(),
    }))
}

/// POST /api/todos/reorder - Rewrite positions to match the given id order.
///
/// One independent position update per id, dispatched concurrently. There
/// is no transaction around the batch; a failed update leaves that row's
/// position stale until the next successful reorder rewrites the sequence.
async fn reorder_todos(
    State(state): State<Arc<super::routes::AppState>>,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, String)> {
    let updates = req.todo_ids.iter().enumerate().map(|(index, id)| {
        let store = state.store.as_ref();
        let id = *id;
        async move {
            if let Err(e) = store.set_position(id, index as i64).await {
                tracing::warn!("Failed to set position {} for todo {}: {}", index, id, e);
            }
        }
    });

    futures::future::join_all(updates).await;

    Ok(Json(MessageResponse {
        message: "Reorder successful".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::routes::AppState;
    use crate::config::Config;
    use crate::store::{InMemoryTodoStore, TodoStoreType};
    use std::path::PathBuf;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState {
            config: Config::new(
                "127.0.0.1".to_string(),
                0,
                PathBuf::from("."),
                TodoStoreType::Memory,
            ),
            store: Box::new(InMemoryTodoStore::new()),
        })
    }

    async fn seed(state: &Arc<AppState>, texts: &[&str]) -> Vec<Todo> {
        let mut created = Vec::new();
        for text in texts {
            let (_, Json(todo)) = create_todo(
                State(Arc::clone(state)),
                Json(CreateTodoRequest {
                    text: Some(text.to_string()),
                }),
            )
            .await
            .expect("Failed to create todo");
            created.push(todo);
        }
        created
    }

    #[tokio::test]
    async fn create_rejects_missing_text() {
        let state = test_state();
        let err = create_todo(
            State(Arc::clone(&state)),
            Json(CreateTodoRequest { text: None }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_rejects_whitespace_text_without_mutating_store() {
        let state = test_state();
        let err = create_todo(
            State(Arc::clone(&state)),
            Json(CreateTodoRequest {
                text: Some("   ".to_string()),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert!(state.store.list_todos().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_trims_text_and_returns_201() {
        let state = test_state();
        let (status, Json(todo)) = create_todo(
            State(Arc::clone(&state)),
            Json(CreateTodoRequest {
                text: Some("  buy milk  ".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(todo.text, "buy milk");
        assert_eq!(todo.position, 0);
        assert!(!todo.completed);
    }

    #[tokio::test]
    async fn list_returns_position_order() {
        let state = test_state();
        let created = seed(&state, &["one", "two", "three"]).await;

        let Json(listed) = list_todos(State(Arc::clone(&state))).await.unwrap();
        let ids: Vec<Uuid> = listed.iter().map(|t| t.id).collect();
        assert_eq!(ids, created.iter().map(|t| t.id).collect::<Vec<_>>());
        let positions: Vec<i64> = listed.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn get_missing_todo_returns_404() {
        let state = test_state();
        let err = get_todo(State(state), AxumPath(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_rejects_empty_body() {
        let state = test_state();
        let created = seed(&state, &["task"]).await;

        let err = update_todo(
            State(Arc::clone(&state)),
            AxumPath(created[0].id),
            Json(UpdateTodoRequest {
                text: None,
                completed: None,
                position: None,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_rejects_whitespace_text() {
        let state = test_state();
        let created = seed(&state, &["task"]).await;

        let err = update_todo(
            State(Arc::clone(&state)),
            AxumPath(created[0].id),
            Json(UpdateTodoRequest {
                text: Some("  ".to_string()),
                completed: None,
                position: None,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_applies_partial_patch() {
        let state = test_state();
        let created = seed(&state, &["task"]).await;

        let Json(updated) = update_todo(
            State(Arc::clone(&state)),
            AxumPath(created[0].id),
            Json(UpdateTodoRequest {
                text: None,
                completed: Some(true),
                position: None,
            }),
        )
        .await
        .unwrap();
        assert!(updated.completed);
        assert_eq!(updated.text, "task");
    }

    #[tokio::test]
    async fn update_missing_todo_is_an_internal_error() {
        let state = test_state();
        let err = update_todo(
            State(state),
            AxumPath(Uuid::new_v4()),
            Json(UpdateTodoRequest {
                text: None,
                completed: Some(true),
                position: None,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn delete_absent_id_still_reports_success() {
        let state = test_state();
        let Json(resp) = delete_todo(State(state), AxumPath(Uuid::new_v4()))
            .await
            .unwrap();
        assert_eq!(resp.message, "Todo deleted successfully");
    }

    #[tokio::test]
    async fn reorder_rewrites_positions_in_array_order() {
        let state = test_state();
        let created = seed(&state, &["a", "b", "c"]).await;
        let (a, b, c) = (created[0].id, created[1].id, created[2].id);

        reorder_todos(
            State(Arc::clone(&state)),
            Json(ReorderRequest {
                todo_ids: vec![b, a, c],
            }),
        )
        .await
        .unwrap();

        let Json(listed) = list_todos(State(state)).await.unwrap();
        let ids: Vec<Uuid> = listed.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![b, a, c]);
        let positions: Vec<i64> = listed.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn reorder_ignores_unknown_ids() {
        let state = test_state();
        let created = seed(&state, &["a", "b"]).await;
        let (a, b) = (created[0].id, created[1].id);

        reorder_todos(
            State(Arc::clone(&state)),
            Json(ReorderRequest {
                todo_ids: vec![b, Uuid::new_v4(), a],
            }),
        )
        .await
        .unwrap();

        let Json(listed) = list_todos(State(state)).await.unwrap();
        let ids: Vec<Uuid> = listed.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![b, a]);
        let positions: Vec<i64> = listed.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 2]);
    }
}
