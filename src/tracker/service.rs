/// Upstream position fetcher with its own snapshot cache
///
/// The service keeps the most recent successful fetch under a
/// shared/exclusive lock. Callers inside the freshness window are served
/// from the snapshot without touching the network; the remote call for a
/// miss happens entirely outside any lock, so concurrent missers may race
/// into a small, bounded amount of duplicate upstream traffic rather than
/// queue behind each other.
///
/// A failed fetch never evicts or overwrites the last good snapshot.
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::arguments::is_debug_tracker_enabled;
use crate::errors::{TrackerError, TrackerResult};
use crate::logger::{self, LogTag};
use crate::observer::TrackerObserver;

use super::client::HttpClient;
use super::types::{IssNowResponse, IssPosition};

/// Last good fetch and when it happened
struct Snapshot {
    position: IssPosition,
    fetched_at: Instant,
}

pub struct IssService {
    http_client: HttpClient,
    api_url: String,
    freshness: Duration,
    snapshot: RwLock<Option<Snapshot>>,
    observer: Arc<dyn TrackerObserver>,
}

impl IssService {
    pub fn new(
        api_url: impl Into<String>,
        freshness: Duration,
        request_timeout: Duration,
        observer: Arc<dyn TrackerObserver>,
    ) -> Result<Self, String> {
        Ok(Self {
            http_client: HttpClient::new(request_timeout)?,
            api_url: api_url.into(),
            freshness,
            snapshot: RwLock::new(None),
            observer,
        })
    }

    /// Return the freshest position, fetching from upstream on a miss
    pub async fn fetch_latest(&self) -> TrackerResult<IssPosition> {
        // Fresh snapshot under the shared lock
        {
            let snapshot = self.snapshot.read().await;
            if let Some(snap) = snapshot.as_ref() {
                if snap.fetched_at.elapsed() < self.freshness {
                    if is_debug_tracker_enabled() {
                        logger::debug(
                            LogTag::Tracker,
                            &format!(
                                "Snapshot hit (age={}ms)",
                                snap.fetched_at.elapsed().as_millis()
                            ),
                        );
                    }
                    return Ok(snap.position.clone());
                }
            }
        }

        // Remote call outside any lock
        let position = match self.fetch_remote().await {
            Ok(position) => position,
            Err(e) => {
                self.observer.on_fetch_failure();
                logger::warning(LogTag::Tracker, &format!("Upstream fetch failed: {}", e));
                return Err(e);
            }
        };

        // Overwrite the snapshot under the exclusive lock
        {
            let mut snapshot = self.snapshot.write().await;
            *snapshot = Some(Snapshot {
                position: position.clone(),
                fetched_at: Instant::now(),
            });
        }

        self.observer.on_fetch_success();

        if is_debug_tracker_enabled() {
            logger::debug(
                LogTag::Tracker,
                &format!(
                    "Snapshot refreshed (lat={:.4}, lng={:.4})",
                    position.latitude, position.longitude
                ),
            );
        }

        Ok(position)
    }

    /// One remote round-trip: request, status check, parse, translate
    async fn fetch_remote(&self) -> TrackerResult<IssPosition> {
        let response = self
            .http_client
            .client()
            .get(&self.api_url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| TrackerError::UpstreamUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TrackerError::UpstreamBadResponse(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let wire: IssNowResponse = response
            .json()
            .await
            .map_err(|e| TrackerError::UpstreamBadResponse(e.to_string()))?;

        IssPosition::from_wire(wire)
    }

    /// Age of the current snapshot, if any
    pub async fn snapshot_age(&self) -> Option<Duration> {
        let snapshot = self.snapshot.read().await;
        snapshot.as_ref().map(|s| s.fetched_at.elapsed())
    }
}
