/// Generic in-memory store with per-entry TTL
///
/// Thread-safe, generic over the value type. Each entry carries its own
/// absolute expiry instant; a lookup past that instant behaves as if the
/// entry were absent and evicts it. A background sweep bounds memory even
/// for keys that are never read again.
///
/// Reads take the shared lock; writes, stale-entry eviction and the sweep
/// take the exclusive lock. No I/O happens inside the store.
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use crate::arguments::is_debug_cache_enabled;
use crate::logger::{self, LogTag};

/// Entry with its absolute expiry instant
struct StoreEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> StoreEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now > self.expires_at
    }
}

/// Store counters for monitoring
#[derive(Debug, Clone, Default)]
pub struct StoreMetrics {
    pub hits: u64,
    pub misses: u64,
    pub expirations: u64,
    pub inserts: u64,
}

/// Expiring key-value store
pub struct ExpiringStore<V: Clone> {
    entries: Arc<RwLock<HashMap<String, StoreEntry<V>>>>,
    metrics: Arc<RwLock<StoreMetrics>>,
}

impl<V: Clone> Default for ExpiringStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> ExpiringStore<V> {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            metrics: Arc::new(RwLock::new(StoreMetrics::default())),
        }
    }

    /// Store `value` under `key` with `expires_at = now + ttl`
    ///
    /// Overwrites any existing entry unconditionally (last-writer-wins).
    pub fn set(&self, key: &str, value: V, ttl: Duration) {
        let entry = StoreEntry {
            value,
            expires_at: Instant::now() + ttl,
        };

        let mut entries = self.entries.write().unwrap();
        entries.insert(key.to_string(), entry);

        let mut metrics = self.metrics.write().unwrap();
        metrics.inserts += 1;
    }

    /// Get the value for `key` if present and not expired
    ///
    /// A stale entry is removed opportunistically. Unknown keys are a plain
    /// miss, never an error.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();

        // Fast path under the shared lock
        let stale = {
            let entries = self.entries.read().unwrap();
            match entries.get(key) {
                Some(entry) if !entry.is_expired(now) => {
                    let value = entry.value.clone();
                    let mut metrics = self.metrics.write().unwrap();
                    metrics.hits += 1;
                    return Some(value);
                }
                Some(_) => true,
                None => false,
            }
        };

        // Stale entry: take the exclusive lock and re-check before evicting,
        // a writer may have replaced it since the read guard was dropped.
        if stale {
            let mut entries = self.entries.write().unwrap();
            if let Some(entry) = entries.get(key) {
                if entry.is_expired(Instant::now()) {
                    entries.remove(key);
                    let mut metrics = self.metrics.write().unwrap();
                    metrics.misses += 1;
                    metrics.expirations += 1;
                    return None;
                }
                let value = entry.value.clone();
                let mut metrics = self.metrics.write().unwrap();
                metrics.hits += 1;
                return Some(value);
            }
        }

        let mut metrics = self.metrics.write().unwrap();
        metrics.misses += 1;
        None
    }

    /// Remove a key outright
    pub fn remove(&self, key: &str) {
        let mut entries = self.entries.write().unwrap();
        entries.remove(key);
    }

    /// Drop all entries
    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap();
        entries.clear();
    }

    /// Current entry count (expired entries included until swept)
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current counters
    pub fn metrics(&self) -> StoreMetrics {
        self.metrics.read().unwrap().clone()
    }

    /// Remove every expired entry; returns how many were dropped
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().unwrap();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        let swept = before - entries.len();

        if swept > 0 {
            let mut metrics = self.metrics.write().unwrap();
            metrics.expirations += swept as u64;
        }

        swept
    }
}

impl<V: Clone + Send + Sync + 'static> ExpiringStore<V> {
    /// Spawn the background sweep task
    ///
    /// Runs `sweep` on a fixed interval independent of reads. The returned
    /// handle lets the boundary abort the task at shutdown.
    pub fn spawn_sweeper(self: &Arc<Self>, every: Duration) -> tokio::task::JoinHandle<()> {
        let store = Arc::clone(self);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            // First tick fires immediately; skip it so the sweep cadence
            // starts one full interval after startup.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let swept = store.sweep();

                if swept > 0 && is_debug_cache_enabled() {
                    logger::debug(
                        LogTag::Cache,
                        &format!("Sweep removed {} expired entries", swept),
                    );
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_set_get_roundtrip() {
        let store = ExpiringStore::new();

        store.set("key1", "value1".to_string(), Duration::from_secs(60));
        assert_eq!(store.get("key1"), Some("value1".to_string()));

        let metrics = store.metrics();
        assert_eq!(metrics.hits, 1);
        assert_eq!(metrics.inserts, 1);
    }

    #[test]
    fn test_unknown_key_is_a_plain_miss() {
        let store: ExpiringStore<String> = ExpiringStore::new();

        assert_eq!(store.get("nonexistent"), None);
        assert_eq!(store.metrics().misses, 1);
    }

    #[test]
    fn test_value_expires_after_ttl() {
        let store = ExpiringStore::new();

        store.set("key", 42u32, Duration::from_millis(40));
        assert_eq!(store.get("key"), Some(42));

        thread::sleep(Duration::from_millis(60));
        assert_eq!(store.get("key"), None);
        // The stale read evicted the entry
        assert_eq!(store.len(), 0);
        assert_eq!(store.metrics().expirations, 1);
    }

    #[test]
    fn test_set_overwrites_unconditionally() {
        let store = ExpiringStore::new();

        store.set("key", 1u32, Duration::from_millis(20));
        store.set("key", 2u32, Duration::from_secs(60));
        thread::sleep(Duration::from_millis(40));

        // Second write replaced the entry and its expiry
        assert_eq!(store.get("key"), Some(2));
    }

    #[test]
    fn test_sweep_removes_only_expired_entries() {
        let store = ExpiringStore::new();

        store.set("short", 1u32, Duration::from_millis(20));
        store.set("long", 2u32, Duration::from_secs(60));
        thread::sleep(Duration::from_millis(40));

        let swept = store.sweep();
        assert_eq!(swept, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("long"), Some(2));
    }

    #[tokio::test]
    async fn test_background_sweeper_bounds_unread_keys() {
        let store = Arc::new(ExpiringStore::new());
        let handle = store.spawn_sweeper(Duration::from_millis(30));

        store.set("never-read", 1u32, Duration::from_millis(10));
        assert_eq!(store.len(), 1);

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(store.len(), 0);

        handle.abort();
    }

    #[test]
    fn test_concurrent_readers_and_writers() {
        let store = Arc::new(ExpiringStore::new());
        let mut handles = Vec::new();

        for i in 0..8 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for j in 0..100 {
                    let key = format!("key{}", j % 10);
                    if i % 2 == 0 {
                        store.set(&key, j, Duration::from_secs(60));
                    } else {
                        let _ = store.get(&key);
                    }
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(store.len() <= 10);
    }
}
