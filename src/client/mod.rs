//! Todo API client (minimal adapter).
//!
//! Provides a thin REST adapter over the server endpoints plus the
//! in-memory view state ([`board`]) that mirrors what the web frontend
//! keeps between renders.

pub mod board;

pub use board::{Filter, TodoBoard, TodoSession};

use anyhow::Context;
use serde_json::json;
use uuid::Uuid;

use crate::store::{Todo, UpdateTodo};

#[derive(Clone)]
pub struct TodoClient {
    base_url: String,
    client: reqwest::Client,
}

impl TodoClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_todos(&self) -> anyhow::Result<Vec<Todo>> {
        let url = format!("{}/api/todos", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to call GET /api/todos")?;

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            anyhow::bail!("GET /api/todos failed: {} - {}", status, text);
        }

        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse todo list response: {}", text))
    }

    pub async fn create_todo(&self, text: &str) -> anyhow::Result<Todo> {
        let url = format!("{}/api/todos", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&json!({ "text": text }))
            .send()
            .await
            .context("Failed to call POST /api/todos")?;

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            anyhow::bail!("POST /api/todos failed: {} - {}", status, text);
        }

        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse created todo response: {}", text))
    }

    pub async fn get_todo(&self, id: Uuid) -> anyhow::Result<Todo> {
        let url = format!("{}/api/todos/{}", self.base_url, id);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to call GET /api/todos/{id}")?;

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            anyhow::bail!("GET /api/todos/{} failed: {} - {}", id, status, text);
        }

        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse todo response: {}", text))
    }

    pub async fn update_todo(&self, id: Uuid, patch: &UpdateTodo) -> anyhow::Result<Todo> {
        let url = format!("{}/api/todos/{}", self.base_url, id);
        let resp = self
            .client
            .patch(&url)
            .json(patch)
            .send()
            .await
            .context("Failed to call PATCH /api/todos/{id}")?;

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            anyhow::bail!("PATCH /api/todos/{} failed: {} - {}", id, status, text);
        }

        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse updated todo response: {}", text))
    }

    pub async fn delete_todo(&self, id: Uuid) -> anyhow::Result<()> {
        let url = format!("{}/api/todos/{}", self.base_url, id);
        let resp = self
            .client
            .delete(&url)
            .send()
            .await
            .context("Failed to call DELETE /api/todos/{id}")?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            anyhow::bail!("DELETE /api/todos/{} failed: {} - {}", id, status, text);
        }

        Ok(())
    }

    pub async fn reorder(&self, ids: &[Uuid]) -> anyhow::Result<()> {
        let url = format!("{}/api/todos/reorder", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&json!({ "todoIds": ids }))
            .send()
            .await
            .context("Failed to call POST /api/todos/reorder")?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            anyhow::bail!("POST /api/todos/reorder failed: {} - {}", status, text);
        }

        Ok(())
    }
}
