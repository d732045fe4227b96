/// Base HTTP client for upstream APIs
use reqwest::Client;
use std::time::Duration;

/// HTTP client wrapper with a bounded request timeout
///
/// The timeout covers the whole request, so a hung upstream can never stall
/// a caller for longer than the configured bound.
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Result<Self, String> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        Ok(Self { client, timeout })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
