//! HTTP server wiring and top-level handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, Json},
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::store::{self, TodoStore};

use super::todos;
use super::types::HealthResponse;

/// The embedded single-page frontend.
const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// The todo store backend
    pub store: Box<dyn TodoStore>,
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let store = store::create_todo_store(config.store_type, config.data_dir.clone())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize todo store: {}", e))?;
    tracing::info!(
        "Todo store initialized: {} (persistent: {})",
        config.store_type.as_str(),
        store.is_persistent()
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        store,
    });

    let app = Router::new()
        .route("/", get(index))
        .route("/api/health", get(health))
        .nest("/api/todos", todos::routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::clone(&state));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for a shutdown signal.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// GET / - Serve the embedded frontend.
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /api/health - Health check endpoint.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: state.config.store_type.as_str().to_string(),
    })
}
