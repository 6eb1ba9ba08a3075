// Shared transport configuration for building reqwest::Client instances.
//
// Every sensor request goes through one client built here, so timeout,
// port and body-size limits are decided in a single place.

use std::time::Duration;

/// Default per-request timeout. A slow sensor reports as an ordinary failure.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Upper bound on a response body. Larger payloads are rejected.
pub const MAX_RESPONSE_BYTES: usize = 1 << 20;

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    /// TCP port of the sensor's local API.
    pub port: u16,
    pub max_body_bytes: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            port: 80,
            max_body_bytes: MAX_RESPONSE_BYTES,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("airdeck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(crate::error::Error::Transport)
    }

    /// Override the port (sensors listen on 80; tests use an ephemeral one).
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
