/// Real-time WebSocket layer
///
/// The hub keeps the subscriber registry and fans published envelopes out
/// to bounded per-connection queues; one connection task per client drains
/// its queue onto the socket.
pub mod connection;
pub mod health;
pub mod hub;
pub mod message;

pub use hub::{ConnectionId, WsHub};
pub use message::{Topic, WsEnvelope};
