/// ISS position endpoint and publish trigger
///
/// `GET /api/iss/position` is the single entry point that drives the whole
/// pipeline: consult the short-TTL store, fall through to the upstream
/// fetcher on a miss, cache the fresh position and fan it out over the
/// WebSocket hub. A cache hit answers from memory and publishes nothing.
use axum::{extract::State, http::StatusCode, response::Response, routing::get, Router};
use std::sync::Arc;

use crate::arguments::is_debug_webserver_enabled;
use crate::cache::POSITION_KEY;
use crate::config;
use crate::errors::TrackerResult;
use crate::logger::{self, LogTag};
use crate::tracker::IssPosition;
use crate::webserver::{
    state::AppState,
    utils::{error_response, success_response_with_message},
    ws::WsEnvelope,
};

/// Create ISS routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/iss/position", get(get_position))
}

/// Where a served position came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionSource {
    Cache,
    Upstream,
}

/// Resolve the current position and, on a cache miss, publish it
///
/// Exactly one of two paths runs per call: a cache hit returns the stored
/// position untouched, a miss fetches upstream, stores the result under
/// its TTL and broadcasts it to every live subscriber. A failed fetch
/// mutates neither the store nor the hub.
pub async fn live_position(state: &AppState) -> TrackerResult<(IssPosition, PositionSource)> {
    if let Some(position) = state.position_cache.get(POSITION_KEY) {
        state.metrics.record_cache_hit();
        return Ok((position, PositionSource::Cache));
    }

    let position = state.tracker.fetch_latest().await?;

    let ttl = config::with_config(|cfg| cfg.position_cache_ttl);
    state.position_cache.set(POSITION_KEY, position.clone(), ttl);

    match WsEnvelope::iss_update(&position) {
        Ok(envelope) => {
            state.hub.broadcast(envelope).await;
            state.metrics.record_broadcast();
        }
        Err(e) => {
            logger::error(
                LogTag::Webserver,
                &format!("Failed to build position envelope: {}", e),
            );
        }
    }

    Ok((position, PositionSource::Upstream))
}

/// GET /api/iss/position
async fn get_position(State(state): State<Arc<AppState>>) -> Response {
    state.metrics.record_request();

    match live_position(&state).await {
        Ok((position, PositionSource::Cache)) => {
            if is_debug_webserver_enabled() {
                logger::debug(LogTag::Webserver, "Position served from cache");
            }
            success_response_with_message(position, "ISS position retrieved from cache")
        }
        Ok((position, PositionSource::Upstream)) => {
            if is_debug_webserver_enabled() {
                logger::debug(LogTag::Webserver, "Position fetched and published");
            }
            success_response_with_message(position, "ISS position retrieved successfully")
        }
        Err(e) => {
            state.metrics.record_error();
            logger::warning(
                LogTag::Webserver,
                &format!("Position request failed: {}", e),
            );
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch ISS position",
                "Please try again later",
            )
        }
    }
}
