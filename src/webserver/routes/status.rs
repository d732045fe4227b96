/// Health and metrics endpoints
use axum::{extract::State, response::Response, routing::get, Router};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use crate::arguments::is_debug_webserver_enabled;
use crate::logger::{self, LogTag};
use crate::observer::MetricsSnapshot;
use crate::webserver::{state::AppState, utils::success_response};

/// Simple health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Metrics payload: process counters plus live hub state
#[derive(Debug, Clone, Serialize)]
pub struct MetricsResponse {
    #[serde(flatten)]
    pub counters: MetricsSnapshot,
    pub active_connections: usize,
    pub uptime_seconds: u64,
}

/// Create status routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(system_metrics))
}

/// GET /api/health
async fn health_check(State(state): State<Arc<AppState>>) -> Response {
    if is_debug_webserver_enabled() {
        logger::debug(LogTag::Webserver, "Health check endpoint called");
    }

    state.metrics.record_request();

    let response = HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
    };

    success_response(response)
}

/// GET /api/metrics
async fn system_metrics(State(state): State<Arc<AppState>>) -> Response {
    state.metrics.record_request();

    let response = MetricsResponse {
        counters: state.metrics.snapshot(),
        active_connections: state.hub.active_connections().await,
        uptime_seconds: state.uptime_seconds(),
    };

    success_response(response)
}
