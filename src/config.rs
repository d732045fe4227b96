/// Application configuration
///
/// Loaded once at startup from environment variables, then stored in a
/// process-wide singleton accessed through `with_config`. Defaults are
/// chosen so the server runs with no environment at all.
use once_cell::sync::OnceCell;
use std::env;
use std::time::Duration;

/// Default upstream position API
const DEFAULT_ISS_API_URL: &str = "http://api.open-notify.org/iss-now.json";

#[derive(Debug, Clone)]
pub struct Config {
    /// Listen host for the webserver
    pub host: String,

    /// Listen port for the webserver
    pub port: u16,

    /// Upstream position API URL
    pub iss_api_url: String,

    /// Freshness window of the fetcher's own snapshot cache (CACHE_TIMEOUT)
    pub fetch_freshness: Duration,

    /// TTL for positions placed in the expiring store (POSITION_CACHE_TTL)
    pub position_cache_ttl: Duration,

    /// Interval of the expiring store's background sweep
    pub sweep_interval: Duration,

    /// Upstream HTTP request timeout (REQUEST_TIMEOUT)
    pub request_timeout: Duration,

    /// Per-subscriber outbound queue capacity
    pub ws_buffer_size: usize,

    /// Heartbeat ping interval for WebSocket connections
    pub ws_heartbeat: Duration,

    /// Idle timeout after which a silent WebSocket client is dropped
    pub ws_idle_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            iss_api_url: DEFAULT_ISS_API_URL.to_string(),
            fetch_freshness: Duration::from_secs(300),
            position_cache_ttl: Duration::from_secs(5),
            sweep_interval: Duration::from_secs(300),
            request_timeout: Duration::from_secs(10),
            ws_buffer_size: 256,
            ws_heartbeat: Duration::from_secs(30),
            ws_idle_timeout: Duration::from_secs(90),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        let defaults = Config::default();

        Self {
            host: get_env("HOST", &defaults.host),
            port: get_env_parsed("PORT", defaults.port),
            iss_api_url: get_env("ISS_API_URL", &defaults.iss_api_url),
            fetch_freshness: Duration::from_secs(get_env_parsed("CACHE_TIMEOUT", 300)),
            position_cache_ttl: Duration::from_secs(get_env_parsed("POSITION_CACHE_TTL", 5)),
            sweep_interval: Duration::from_secs(get_env_parsed("SWEEP_INTERVAL", 300)),
            request_timeout: Duration::from_secs(get_env_parsed("REQUEST_TIMEOUT", 10)),
            ws_buffer_size: get_env_parsed("WS_BUFFER_SIZE", defaults.ws_buffer_size),
            ws_heartbeat: Duration::from_secs(get_env_parsed("WS_HEARTBEAT_SECS", 30)),
            ws_idle_timeout: Duration::from_secs(get_env_parsed("WS_IDLE_TIMEOUT_SECS", 90)),
        }
    }
}

fn get_env(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

fn get_env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// =============================================================================
// GLOBAL ACCESS
// =============================================================================

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Install the global configuration (first call wins)
pub fn init_config(config: Config) {
    let _ = CONFIG.set(config);
}

/// Run a closure against the global configuration
///
/// Falls back to defaults when `init_config` was never called (tests).
pub fn with_config<T>(f: impl FnOnce(&Config) -> T) -> T {
    match CONFIG.get() {
        Some(config) => f(config),
        None => f(&Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.iss_api_url, DEFAULT_ISS_API_URL);
        assert_eq!(config.position_cache_ttl, Duration::from_secs(5));
        assert_eq!(config.fetch_freshness, Duration::from_secs(300));
    }

    #[test]
    fn test_with_config_uses_defaults_when_uninitialized() {
        let buffer = with_config(|c| c.ws_buffer_size);
        assert!(buffer > 0);
    }
}
