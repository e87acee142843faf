//! Sortrace API /v1: REST endpoints over one shared session
pub mod handlers;
pub mod metrics;
pub mod middleware;

pub use handlers::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use sortrace_core::LogObserver;
use sortrace_input::RunConfig;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handlers::health))
        .route("/v1/algorithms", get(handlers::list_algorithms))
        .route("/v1/sequence", get(handlers::get_sequence))
        .route("/v1/sequence/generate", post(handlers::generate))
        .route("/v1/sequence/custom", post(handlers::load_custom))
        .route("/v1/run", post(handlers::run))
        .route("/v1/race", post(handlers::race))
        .route("/v1/stop", post(handlers::stop))
        .route("/metrics", get(handlers::metrics))
        .layer(middleware::cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until the listener fails.
pub async fn run(addr: &str, config: RunConfig) -> anyhow::Result<()> {
    let state = AppState::new(config, Arc::new(LogObserver))?;
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Sortrace API listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
