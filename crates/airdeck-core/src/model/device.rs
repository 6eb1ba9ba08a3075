// ── Device domain types ──

use airdeck_api::{DeviceConfig, SensorData};
use chrono::{DateTime, Local};

/// One tracked sensor, keyed by its IP address.
///
/// Owned by [`DeviceRegistry`](crate::registry::DeviceRegistry); everything
/// else sees it through shared references.
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    pub ip: String,
    pub name: String,
    /// Last successful reading. Survives later failures.
    pub reading: Option<SensorData>,
    pub config: Option<DeviceConfig>,
    /// Error from the most recent poll, cleared on the next success.
    pub last_error: Option<String>,
    pub last_update: Option<DateTime<Local>>,
}

impl Device {
    /// A device that has not been polled yet, named after its address.
    pub fn new(ip: impl Into<String>) -> Self {
        let ip = ip.into();
        Self {
            name: ip.clone(),
            ip,
            reading: None,
            config: None,
            last_error: None,
            last_update: None,
        }
    }

    /// `true` while the display name is still the bare IP.
    pub fn is_unnamed(&self) -> bool {
        self.name == self.ip
    }

    /// Header text for the device's cell.
    pub fn title(&self) -> String {
        format!("{} ({})", self.name, self.ip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_device_is_named_after_ip() {
        let device = Device::new("10.0.0.5");
        assert!(device.is_unnamed());
        assert_eq!(device.title(), "10.0.0.5 (10.0.0.5)");
        assert!(device.reading.is_none());
    }
}
