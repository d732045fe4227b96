/// Expiring key-value cache
///
/// Pure in-memory data structure with per-entry TTL and a background sweep.
/// It has no knowledge of what produced the values it holds.
pub mod store;

pub use store::{ExpiringStore, StoreMetrics};

/// Store key under which the freshest position is cached
pub const POSITION_KEY: &str = "iss_position";
