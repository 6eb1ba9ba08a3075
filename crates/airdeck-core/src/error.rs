// ── Core error types ──
//
// Fetch failures never surface here: they are recorded on the device as
// its last error. What remains is background machinery failing to start.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Discovery ────────────────────────────────────────────────────
    #[error("mDNS daemon failed to start: {message}")]
    DiscoveryUnavailable { message: String },

    #[error("mDNS browse for {service} failed: {message}")]
    BrowseFailed { service: String, message: String },
}

impl From<mdns_sd::Error> for CoreError {
    fn from(err: mdns_sd::Error) -> Self {
        Self::DiscoveryUnavailable {
            message: err.to_string(),
        }
    }
}
