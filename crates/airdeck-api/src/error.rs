use thiserror::Error;

/// Top-level error type for the `airdeck-api` crate.
///
/// Every failure here is transient from the dashboard's point of view:
/// the device keeps its last good reading and is polled again next tick.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Response ────────────────────────────────────────────────────
    /// Non-2xx status from the device.
    #[error("HTTP {status}")]
    Status { status: u16 },

    /// Body exceeded the configured cap.
    #[error("Response body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    /// JSON deserialization failed, with a preview of the raw body.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Map a reqwest error, pulling timeouts out into their own variant.
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout { timeout_secs }
        } else {
            Self::Transport(err)
        }
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            Self::Status { status } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if the device answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404 })
    }
}
