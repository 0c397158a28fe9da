//! API request and response types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to create a new todo.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodoRequest {
    /// The task text. Required; leading/trailing whitespace is trimmed.
    pub text: Option<String>,
}

/// Partial update of an existing todo. All fields optional; an update
/// with no recognized fields is rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTodoRequest {
    pub text: Option<String>,
    pub completed: Option<bool>,
    pub position: Option<i64>,
}

/// Request to rewrite the display order. Positions are assigned by array
/// index.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderRequest {
    #[serde(rename = "todoIds")]
    pub todo_ids: Vec<Uuid>,
}

/// Generic message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Active storage backend (`memory` or `sqlite`)
    pub store: String,
}
