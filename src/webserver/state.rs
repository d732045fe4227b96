/// Shared application state for the webserver
///
/// Holds the core systems every route handler needs: the expiring position
/// store, the upstream tracker, the WebSocket hub and the metrics recorder.
use std::sync::Arc;

use crate::cache::ExpiringStore;
use crate::observer::MetricsRecorder;
use crate::tracker::{IssPosition, IssService};
use crate::webserver::ws::WsHub;

/// Shared application state passed to all route handlers
#[derive(Clone)]
pub struct AppState {
    /// Central WebSocket hub
    pub hub: Arc<WsHub>,

    /// Short-TTL position cache consulted by the publish trigger
    pub position_cache: Arc<ExpiringStore<IssPosition>>,

    /// Upstream position fetcher
    pub tracker: Arc<IssService>,

    /// Counters exposed at /api/metrics
    pub metrics: Arc<MetricsRecorder>,

    /// Server startup time
    pub startup_time: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(
        hub: Arc<WsHub>,
        position_cache: Arc<ExpiringStore<IssPosition>>,
        tracker: Arc<IssService>,
        metrics: Arc<MetricsRecorder>,
    ) -> Self {
        Self {
            hub,
            position_cache,
            tracker,
            metrics,
            startup_time: chrono::Utc::now(),
        }
    }

    /// Server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        (chrono::Utc::now() - self.startup_time).num_seconds().max(0) as u64
    }
}
