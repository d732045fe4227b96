/// Structured error types for the position tracking core
///
/// The upstream fetcher reduces every failure to one of two cases so callers
/// can distinguish "the network/service was unreachable" from "the service
/// answered with something we could not use". Hub-internal failures (full
/// queues, write errors) never surface here - they are handled by eviction.
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum TrackerError {
    /// Transport-level failure: connect error, timeout, DNS, TLS
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Upstream answered, but with a non-success status or unparseable body
    #[error("upstream bad response: {0}")]
    UpstreamBadResponse(String),
}

impl TrackerError {
    /// True when the failure was transport-level rather than a bad payload
    pub fn is_unavailable(&self) -> bool {
        matches!(self, TrackerError::UpstreamUnavailable(_))
    }
}

pub type TrackerResult<T> = Result<T, TrackerError>;
