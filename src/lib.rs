//! Orbitra - live ISS position server
//!
//! Caches the station's position with a short TTL, fetches from the
//! open-notify upstream on demand and pushes every fresh position to
//! WebSocket subscribers.

pub mod arguments;
pub mod cache;
pub mod config;
pub mod errors;
pub mod logger;
pub mod observer;
pub mod tracker;
pub mod webserver;
