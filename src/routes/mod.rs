// src/routes/mod.rs
pub mod ws;

use crate::services::metrics_manager::MetricsData;
use crate::state::SharedState;
use axum::{Json, Router, extract::State, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use ws::ws_handler;

/// Side routes for probes; every other path upgrades to the chat socket.
pub fn create_router() -> Router<SharedState> {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/metrics", get(get_metrics_handler))
        .fallback(ws_handler)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
}

pub fn create_app(state: SharedState) -> Router {
    create_router().with_state(state)
}

pub async fn get_metrics_handler(State(state): State<SharedState>) -> Json<MetricsData> {
    Json(state.metrics.get_metrics().await)
}

/// Serve the relay on an already bound listener until the process exits.
pub async fn serve(listener: tokio::net::TcpListener, state: SharedState) -> std::io::Result<()> {
    axum::serve(listener, create_app(state)).await
}
