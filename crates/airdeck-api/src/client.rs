// Sensor HTTP client
//
// Wraps `reqwest::Client` with host formatting, status checking and a
// bounded body reader. Each sensor exposes two plain JSON endpoints on its
// local interface; no auth, no envelope.

use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::{DeviceConfig, SensorData};
use crate::transport::TransportConfig;

const READING_PATH: &str = "/air-data/latest";
const CONFIG_PATH: &str = "/settings/config/data";

/// Wrap IPv6 literals in brackets so they can sit in the authority part
/// of a URL. Already-bracketed hosts and IPv4 addresses pass through.
pub fn format_host(ip: &str) -> String {
    if ip.contains(':') && !ip.starts_with('[') {
        format!("[{ip}]")
    } else {
        ip.to_owned()
    }
}

/// HTTP client for a sensor's local API.
///
/// Cheap to clone: the underlying `reqwest::Client` shares its pool.
#[derive(Debug, Clone)]
pub struct AirClient {
    http: reqwest::Client,
    transport: TransportConfig,
}

impl AirClient {
    /// Create a client from a `TransportConfig`.
    pub fn new(transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            transport: transport.clone(),
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, transport: TransportConfig) -> Self {
        Self { http, transport }
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Fetch the latest reading from `GET /air-data/latest`.
    pub async fn fetch_reading(&self, ip: &str) -> Result<SensorData, Error> {
        let url = self.endpoint_url(ip, READING_PATH)?;
        self.get_json(url).await
    }

    /// Fetch static device settings from `GET /settings/config/data`.
    pub async fn fetch_config(&self, ip: &str) -> Result<DeviceConfig, Error> {
        let url = self.endpoint_url(ip, CONFIG_PATH)?;
        self.get_json(url).await
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `http://{host}:{port}{path}` for a device address.
    pub(crate) fn endpoint_url(&self, ip: &str, path: &str) -> Result<Url, Error> {
        let host = format_host(ip.trim());
        let full = format!("http://{host}:{}{path}", self.transport.port);
        Ok(Url::parse(&full)?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let timeout_secs = self.transport.timeout.as_secs();

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::from_reqwest(e, timeout_secs))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
            });
        }

        let body = self.read_limited(resp).await?;
        trace!(bytes = body.len(), "response body read");

        serde_json::from_slice(&body).map_err(|e| {
            let text = String::from_utf8_lossy(&body);
            let preview: String = text.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: text.into_owned(),
            }
        })
    }

    /// Read the body chunk by chunk, bailing as soon as the cap is crossed.
    async fn read_limited(&self, mut resp: reqwest::Response) -> Result<Vec<u8>, Error> {
        let limit = self.transport.max_body_bytes;
        let timeout_secs = self.transport.timeout.as_secs();

        if resp
            .content_length()
            .is_some_and(|len| usize::try_from(len).map_or(true, |len| len > limit))
        {
            return Err(Error::BodyTooLarge { limit });
        }

        let mut body = Vec::new();
        while let Some(chunk) = resp
            .chunk()
            .await
            .map_err(|e| Error::from_reqwest(e, timeout_secs))?
        {
            if body.len() + chunk.len() > limit {
                return Err(Error::BodyTooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn format_host_brackets_ipv6_only() {
        assert_eq!(format_host("192.168.1.20"), "192.168.1.20");
        assert_eq!(format_host("fe80::1"), "[fe80::1]");
        assert_eq!(format_host("[fe80::1]"), "[fe80::1]");
    }

    #[test]
    fn endpoint_url_includes_port_and_path() {
        let client = AirClient::with_client(
            reqwest::Client::new(),
            TransportConfig::default().with_port(8080),
        );
        let url = client.endpoint_url("10.0.0.5", READING_PATH).unwrap();
        assert_eq!(url.as_str(), "http://10.0.0.5:8080/air-data/latest");

        let v6 = client.endpoint_url("2001:db8::7", CONFIG_PATH).unwrap();
        assert_eq!(v6.host_str(), Some("[2001:db8::7]"));
        assert_eq!(v6.path(), "/settings/config/data");
    }
}
