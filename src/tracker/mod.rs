/// Upstream position tracking
///
/// Wraps the open-notify API behind a typed client with its own short-lived
/// snapshot cache. This tier is intentionally independent from the generic
/// expiring store so the fetcher is usable standalone.
pub mod client;
pub mod service;
pub mod types;

pub use service::IssService;
pub use types::IssPosition;
