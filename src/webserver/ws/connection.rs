/// WebSocket connection lifecycle
///
/// One task per connection. The writer half drains the hub queue onto the
/// socket until the hub closes the queue, then closes the socket. The
/// reader half only watches for teardown - client frames are not
/// semantically interpreted beyond activity bookkeeping - and any read
/// failure ends the connection.
///
/// Unregister + socket close is the single cleanup path; there is no retry
/// and no replay. A reconnecting client registers as a brand-new
/// subscriber and sees only future publishes.
use axum::extract::ws::{Message, WebSocket};
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use std::time::Duration;

use crate::arguments::is_debug_webserver_enabled;
use crate::config;
use crate::logger::{self, LogTag};

use super::health::{ConnectionHealth, HealthConfig};
use super::hub::WsHub;
use super::message::WsEnvelope;

/// Drive a WebSocket connection until it ends
pub async fn handle_connection(socket: WebSocket, hub: Arc<WsHub>) {
    let (conn_id, mut hub_rx) = hub.register().await;
    let (mut ws_tx, mut ws_rx) = socket.split();

    let health_config = config::with_config(|cfg| HealthConfig {
        heartbeat_interval: cfg.ws_heartbeat,
        idle_timeout: cfg.ws_idle_timeout,
        ..HealthConfig::default()
    });
    let mut health = ConnectionHealth::new(health_config);

    if is_debug_webserver_enabled() {
        logger::debug(
            LogTag::Webserver,
            &format!("Connection {} started", conn_id),
        );
    }

    loop {
        tokio::select! {
            biased;

            // Hub queue -> socket
            maybe_envelope = hub_rx.recv() => {
                match maybe_envelope {
                    Some(envelope) => {
                        if let Err(e) = forward_to_client(&mut ws_tx, envelope).await {
                            logger::warning(
                                LogTag::Webserver,
                                &format!("Connection {}: write failed: {}", conn_id, e),
                            );
                            break;
                        }
                    }
                    None => {
                        // Queue closed by the hub (eviction or shutdown)
                        let _ = ws_tx.send(Message::Close(None)).await;
                        break;
                    }
                }
            }

            // Socket -> teardown watch only
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        if is_debug_webserver_enabled() {
                            logger::debug(
                                LogTag::Webserver,
                                &format!("Connection {}: client closed", conn_id),
                            );
                        }
                        break;
                    }
                    Some(Ok(_)) => {
                        // Pings, pongs and stray frames only refresh liveness
                        health.record_activity();
                    }
                    Some(Err(e)) => {
                        logger::warning(
                            LogTag::Webserver,
                            &format!("Connection {}: read failed: {}", conn_id, e),
                        );
                        break;
                    }
                }
            }

            // Periodic health checks
            _ = tokio::time::sleep(Duration::from_secs(1)) => {
                if health.is_idle() {
                    logger::warning(
                        LogTag::Webserver,
                        &format!(
                            "Connection {}: idle timeout ({}s)",
                            conn_id,
                            health.seconds_since_activity()
                        ),
                    );
                    break;
                }

                if health.is_pong_overdue() {
                    logger::warning(
                        LogTag::Webserver,
                        &format!("Connection {}: pong timeout", conn_id),
                    );
                    break;
                }

                if health.needs_ping() {
                    if ws_tx.send(Message::Ping(vec![])).await.is_err() {
                        break;
                    }
                    health.record_ping();
                }
            }
        }
    }

    // Single cleanup path; idempotent when the hub already evicted us
    hub.unregister(conn_id).await;

    if is_debug_webserver_enabled() {
        logger::debug(LogTag::Webserver, &format!("Connection {} closed", conn_id));
    }
}

/// Serialize and send one envelope
async fn forward_to_client(
    ws_tx: &mut SplitSink<WebSocket, Message>,
    envelope: WsEnvelope,
) -> Result<(), axum::Error> {
    match envelope.to_json() {
        Ok(json) => ws_tx.send(Message::Text(json)).await,
        Err(e) => {
            // A malformed envelope should not take the connection down
            logger::error(
                LogTag::Webserver,
                &format!("Failed to serialize envelope: {}", e),
            );
            Ok(())
        }
    }
}
