//! # tasklight
//!
//! Self-hosted TODO list server with drag-and-drop ordering.
//!
//! This library provides:
//! - A REST API over a todo store (list, create, read, update, delete,
//!   bulk reorder)
//! - Pluggable storage backends (SQLite or in-memory) behind one trait
//! - An embedded single-page web frontend
//! - A Rust client mirroring the frontend's view state machine
//!
//! ## Ordering model
//!
//! Every todo carries an integer `position`; the list endpoint returns
//! todos ascending by position. Creation appends at `max + 1`. The reorder
//! endpoint rewrites `position = index` for a full id sequence, which is
//! how drag-and-drop and the move-completed-to-top behavior persist their
//! changes.
//!
//! ## Modules
//! - `api`: HTTP routes and request/response types
//! - `store`: the `TodoStore` trait and its backends
//! - `client`: REST adapter plus the board/session view state
//! - `config`: environment-driven configuration

pub mod api;
pub mod client;
pub mod config;
pub mod store;

pub use client::{Filter, TodoBoard, TodoClient, TodoSession};
pub use config::Config;
pub use store::{Todo, TodoStore, UpdateTodo};
