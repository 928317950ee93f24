//! HTTP server implementation using Axum.

use axum::{
    Router,
    routing::{get, post},
};
use savi_core::error::{Result, SaviError};
use savi_engine::Engine;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;

/// Shared state for the gateway server.
#[derive(Clone)]
pub struct AppState {
    /// The chatbot engine — read-only, shared across all requests.
    pub engine: Arc<Engine>,
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine: Arc::new(engine),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health_check))
        .route("/chatbot/query", post(routes::chatbot_query))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Bind and serve until shutdown.
pub async fn serve(state: AppState, host: &str, port: u16) -> Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| SaviError::Http(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!("🌐 Savi gateway listening on http://{addr}");
    axum::serve(listener, build_router(state))
        .await
        .map_err(|e| SaviError::Http(e.to_string()))?;
    Ok(())
}
