/// Connection health tracking
///
/// Heartbeat and timeout bookkeeping for a single WebSocket connection.
/// The connection loop consults this once a second: idle clients and
/// clients that never answer a ping are torn down.
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct HealthConfig {
    /// Server sends a ping after this much client silence
    pub heartbeat_interval: Duration,

    /// Client is dropped after this much total silence
    pub idle_timeout: Duration,

    /// A ping unanswered for this long is fatal
    pub pong_timeout: Duration,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(90),
            pong_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug)]
pub struct ConnectionHealth {
    last_activity: Instant,
    last_ping: Option<Instant>,
    config: HealthConfig,
}

impl ConnectionHealth {
    pub fn new(config: HealthConfig) -> Self {
        Self {
            last_activity: Instant::now(),
            last_ping: None,
            config,
        }
    }

    /// Any inbound frame counts as activity and clears a pending ping
    pub fn record_activity(&mut self) {
        self.last_activity = Instant::now();
        self.last_ping = None;
    }

    pub fn record_ping(&mut self) {
        self.last_ping = Some(Instant::now());
    }

    pub fn is_idle(&self) -> bool {
        self.last_activity.elapsed() > self.config.idle_timeout
    }

    pub fn is_pong_overdue(&self) -> bool {
        self.last_ping
            .map(|sent| sent.elapsed() > self.config.pong_timeout)
            .unwrap_or(false)
    }

    pub fn needs_ping(&self) -> bool {
        self.last_activity.elapsed() > self.config.heartbeat_interval && self.last_ping.is_none()
    }

    pub fn seconds_since_activity(&self) -> u64 {
        self.last_activity.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_idle_and_ping_lifecycle() {
        let config = HealthConfig {
            heartbeat_interval: Duration::from_millis(40),
            idle_timeout: Duration::from_millis(100),
            pong_timeout: Duration::from_millis(30),
        };
        let mut health = ConnectionHealth::new(config);

        assert!(!health.is_idle());
        assert!(!health.needs_ping());

        sleep(Duration::from_millis(60));
        assert!(health.needs_ping());

        health.record_ping();
        assert!(!health.needs_ping());
        sleep(Duration::from_millis(50));
        assert!(health.is_pong_overdue());

        health.record_activity();
        assert!(!health.is_pong_overdue());
        assert!(!health.is_idle());

        sleep(Duration::from_millis(120));
        assert!(health.is_idle());
    }
}
