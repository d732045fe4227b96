/// Central WebSocket hub - subscriber registry and broadcaster
///
/// The hub owns the set of live subscriber connections. All mutations of
/// the set go through `register`/`unregister`/`broadcast`, each of which
/// holds the map's exclusive guard for its critical section, so the set is
/// never observed in a torn state.
///
/// Backpressure: every subscriber has a bounded outbound queue. A publish
/// attempts exactly one non-blocking enqueue per live subscriber; a full
/// queue marks the subscriber unresponsive and it is removed - with its
/// queue closed - before the same publish call returns. Slow consumers are
/// dropped rather than allowed to stall delivery to healthy ones.
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

use crate::arguments::is_debug_hub_enabled;
use crate::logger::{self, LogTag};
use crate::observer::TrackerObserver;

use super::message::WsEnvelope;

/// Connection ID (unique per WebSocket connection for the process lifetime)
pub type ConnectionId = u64;

/// Per-connection sender side of the bounded outbound queue
type ConnectionSender = mpsc::Sender<WsEnvelope>;

pub struct WsHub {
    /// Live subscribers (connection id -> queue sender)
    connections: RwLock<HashMap<ConnectionId, ConnectionSender>>,

    /// Next connection ID
    next_conn_id: AtomicU64,

    /// Per-subscriber queue capacity
    buffer_size: usize,

    /// Event observer (eviction notifications)
    observer: Arc<dyn TrackerObserver>,
}

impl WsHub {
    pub fn new(buffer_size: usize, observer: Arc<dyn TrackerObserver>) -> Arc<Self> {
        Arc::new(Self {
            connections: RwLock::new(HashMap::new()),
            next_conn_id: AtomicU64::new(1),
            buffer_size,
            observer,
        })
    }

    /// Register a new subscriber; always succeeds
    ///
    /// Returns the connection id and the receiving end of its outbound
    /// queue. The caller's writer loop drains the receiver until the hub
    /// closes it.
    pub async fn register(&self) -> (ConnectionId, mpsc::Receiver<WsEnvelope>) {
        let conn_id = self.next_conn_id.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = mpsc::channel(self.buffer_size);

        let active = {
            let mut connections = self.connections.write().await;
            connections.insert(conn_id, tx);
            connections.len()
        };

        if is_debug_hub_enabled() {
            logger::debug(
                LogTag::Hub,
                &format!("Connection {} registered (active={})", conn_id, active),
            );
        }

        (conn_id, rx)
    }

    /// Remove a subscriber and close its queue
    ///
    /// Idempotent: unregistering an id that was already removed (or never
    /// existed) is a no-op. Dropping the sender is what closes the queue,
    /// so a blocked writer loop observes closure and tears down.
    pub async fn unregister(&self, conn_id: ConnectionId) {
        let removed = {
            let mut connections = self.connections.write().await;
            connections.remove(&conn_id).is_some()
        };

        if removed && is_debug_hub_enabled() {
            let active = self.connections.read().await.len();
            logger::debug(
                LogTag::Hub,
                &format!("Connection {} unregistered (active={})", conn_id, active),
            );
        }
    }

    /// Fan a message out to every live subscriber
    ///
    /// One `try_send` per subscriber, never blocking on any of them. Full
    /// or already-closed queues are evicted within this same call.
    pub async fn broadcast(&self, envelope: WsEnvelope) {
        let mut connections = self.connections.write().await;
        if connections.is_empty() {
            return;
        }

        let mut sent = 0usize;
        let mut evicted: Vec<ConnectionId> = Vec::new();

        for (conn_id, sender) in connections.iter() {
            match sender.try_send(envelope.clone()) {
                Ok(_) => sent += 1,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    // Unresponsive consumer: drop it rather than stall
                    evicted.push(*conn_id);
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    // Reader already gone; reclaim the entry now
                    evicted.push(*conn_id);
                }
            }
        }

        for conn_id in &evicted {
            connections.remove(conn_id);
            self.observer.on_subscriber_evicted(*conn_id);
            logger::warning(
                LogTag::Hub,
                &format!("Connection {} evicted (queue full or closed)", conn_id),
            );
        }

        if is_debug_hub_enabled() {
            logger::debug(
                LogTag::Hub,
                &format!(
                    "Broadcast {} (sent={}, evicted={})",
                    envelope.kind,
                    sent,
                    evicted.len()
                ),
            );
        }
    }

    /// Current live subscriber count
    pub async fn active_connections(&self) -> usize {
        self.connections.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::{MetricsRecorder, NoopObserver};
    use crate::webserver::ws::message::Topic;

    fn envelope(n: u64) -> WsEnvelope {
        WsEnvelope::new(Topic::IssUpdate, serde_json::json!({ "n": n }))
    }

    #[tokio::test]
    async fn test_register_and_unregister() {
        let hub = WsHub::new(8, Arc::new(NoopObserver));

        let (id1, _rx1) = hub.register().await;
        let (id2, _rx2) = hub.register().await;
        assert_ne!(id1, id2);
        assert_eq!(hub.active_connections().await, 2);

        hub.unregister(id1).await;
        assert_eq!(hub.active_connections().await, 1);
    }

    #[tokio::test]
    async fn test_unregister_is_idempotent() {
        let hub = WsHub::new(8, Arc::new(NoopObserver));

        let (id, _rx) = hub.register().await;
        hub.unregister(id).await;
        hub.unregister(id).await;
        hub.unregister(9999).await;

        assert_eq!(hub.active_connections().await, 0);
    }

    #[tokio::test]
    async fn test_broadcast_reaches_every_live_subscriber_once() {
        let hub = WsHub::new(8, Arc::new(NoopObserver));

        let (_id1, mut rx1) = hub.register().await;
        let (_id2, mut rx2) = hub.register().await;

        hub.broadcast(envelope(1)).await;

        assert_eq!(rx1.recv().await.unwrap().kind, "iss_update");
        assert_eq!(rx2.recv().await.unwrap().kind, "iss_update");

        // Exactly one enqueue per publish: queues are empty again
        assert!(rx1.try_recv().is_err());
        assert!(rx2.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_full_queue_evicts_during_publish() {
        let recorder = MetricsRecorder::new();
        let hub = WsHub::new(2, Arc::clone(&recorder) as Arc<dyn TrackerObserver>);

        let (slow_id, _slow_rx) = hub.register().await; // never drained
        let (_fast_id, mut fast_rx) = hub.register().await;

        // Fill the slow subscriber's queue (capacity 2), then overflow it
        hub.broadcast(envelope(1)).await;
        hub.broadcast(envelope(2)).await;
        assert_eq!(hub.active_connections().await, 2);

        hub.broadcast(envelope(3)).await;
        assert_eq!(hub.active_connections().await, 1);
        assert_eq!(recorder.snapshot().subscribers_evicted, 1);

        // The healthy subscriber got all three; the evicted one gets no more
        for n in 1..=3 {
            assert_eq!(fast_rx.recv().await.unwrap().data["n"], n);
        }

        hub.broadcast(envelope(4)).await;
        assert_eq!(fast_rx.recv().await.unwrap().data["n"], 4);
        let _ = slow_id;
    }

    #[tokio::test]
    async fn test_closed_receiver_is_reclaimed_on_publish() {
        let hub = WsHub::new(4, Arc::new(NoopObserver));

        let (_id, rx) = hub.register().await;
        drop(rx);
        assert_eq!(hub.active_connections().await, 1);

        hub.broadcast(envelope(1)).await;
        assert_eq!(hub.active_connections().await, 0);
    }

    #[tokio::test]
    async fn test_one_slow_subscriber_among_many() {
        let hub = WsHub::new(4, Arc::new(NoopObserver));

        let mut healthy = Vec::new();
        for _ in 0..99 {
            healthy.push(hub.register().await);
        }
        let (_stuck_id, _stuck_rx) = hub.register().await; // held but never drained
        assert_eq!(hub.active_connections().await, 100);

        // Healthy subscribers drain concurrently; the stuck one overflows
        // once its capacity-4 queue is exceeded.
        let drainers: Vec<_> = healthy
            .iter_mut()
            .map(|(_, rx)| {
                let mut count = 0u32;
                async move {
                    while count < 8 {
                        if rx.recv().await.is_some() {
                            count += 1;
                        } else {
                            break;
                        }
                    }
                    count
                }
            })
            .collect();

        let publisher = async {
            for n in 0..8 {
                hub.broadcast(envelope(n)).await;
                // Let drainers run between publishes so only the stuck
                // subscriber's queue ever fills.
                tokio::time::sleep(std::time::Duration::from_millis(2)).await;
            }
        };

        let (counts, _) = tokio::join!(futures::future::join_all(drainers), publisher);

        assert_eq!(hub.active_connections().await, 99);
        for count in counts {
            assert_eq!(count, 8);
        }
    }

    #[tokio::test]
    async fn test_concurrent_register_unregister_publish() {
        let hub = WsHub::new(16, Arc::new(NoopObserver));

        let mut tasks = Vec::new();
        for _ in 0..20 {
            let hub = Arc::clone(&hub);
            tasks.push(tokio::spawn(async move {
                // Register, receive whatever arrives, then leave
                let (id, mut rx) = hub.register().await;
                tokio::select! {
                    _ = rx.recv() => {}
                    _ = tokio::time::sleep(std::time::Duration::from_millis(5)) => {}
                }
                hub.unregister(id).await;
            }));
        }
        for _ in 0..10 {
            let hub = Arc::clone(&hub);
            tasks.push(tokio::spawn(async move {
                hub.broadcast(envelope(0)).await;
            }));
        }

        for task in tasks {
            task.await.unwrap();
        }

        // Every registered subscriber also unregistered
        assert_eq!(hub.active_connections().await, 0);
    }
}
