//! HTTP API for the todo server.
//!
//! ## Endpoints
//!
//! - `GET /` - Embedded web frontend
//! - `GET /api/health` - Health check
//! - `GET /api/todos` - List todos ordered by position
//! - `POST /api/todos` - Create a todo
//! - `GET /api/todos/{id}` - Get a single todo
//! - `PATCH /api/todos/{id}` - Partially update a todo
//! - `DELETE /api/todos/{id}` - Delete a todo
//! - `POST /api/todos/reorder` - Rewrite positions from an id sequence

pub mod routes;
pub mod todos;
pub mod types;

pub use routes::serve;
pub use types::*;
