/// Event observer and metrics recording
///
/// The core never owns global counters. Instead the fetcher and the hub are
/// handed an observer they call on defined events; the default
/// implementation tallies counters that `/api/metrics` exposes. Tests can
/// inject their own observer to assert on event ordering.
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Callbacks the core invokes on notable events
///
/// All methods default to no-ops so implementors only override what they
/// care about.
pub trait TrackerObserver: Send + Sync {
    /// A fresh position was fetched from upstream
    fn on_fetch_success(&self) {}

    /// An upstream fetch failed (transport or parse)
    fn on_fetch_failure(&self) {}

    /// A subscriber was evicted by the hub (queue overflow or dead channel)
    fn on_subscriber_evicted(&self, _subscriber_id: u64) {}
}

/// Observer that ignores every event
pub struct NoopObserver;

impl TrackerObserver for NoopObserver {}

// =============================================================================
// METRICS RECORDER
// =============================================================================

/// Counter-backed observer plus request bookkeeping for /api/metrics
///
/// Atomic counters only - safe to share and update from any task without
/// locking.
#[derive(Debug, Default)]
pub struct MetricsRecorder {
    requests_total: AtomicU64,
    errors_total: AtomicU64,
    cache_hits: AtomicU64,
    fetch_success: AtomicU64,
    fetch_failures: AtomicU64,
    broadcasts_total: AtomicU64,
    subscribers_evicted: AtomicU64,
}

impl MetricsRecorder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn record_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.errors_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_broadcast(&self) {
        self.broadcasts_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time snapshot for the metrics endpoint
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            errors_total: self.errors_total.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            fetch_success: self.fetch_success.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            broadcasts_total: self.broadcasts_total.load(Ordering::Relaxed),
            subscribers_evicted: self.subscribers_evicted.load(Ordering::Relaxed),
        }
    }
}

impl TrackerObserver for MetricsRecorder {
    fn on_fetch_success(&self) {
        self.fetch_success.fetch_add(1, Ordering::Relaxed);
    }

    fn on_fetch_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    fn on_subscriber_evicted(&self, _subscriber_id: u64) {
        self.subscribers_evicted.fetch_add(1, Ordering::Relaxed);
    }
}

/// Serializable counter snapshot
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub errors_total: u64,
    pub cache_hits: u64,
    pub fetch_success: u64,
    pub fetch_failures: u64,
    pub broadcasts_total: u64,
    pub subscribers_evicted: u64,
}
