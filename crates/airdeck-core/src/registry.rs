// ── Device registry ──
//
// Insertion-ordered map of IP -> Device plus the in-memory copy of the
// persisted name map. Iteration order is first-seen order and never
// changes; devices are never removed.

use std::collections::BTreeMap;

use airdeck_api::{DeviceConfig, SensorData};
use chrono::{DateTime, Local};
use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::model::Device;

/// Every known device, in the order it was first seen.
///
/// Display names follow a fixed precedence: a persisted name always wins,
/// then a discovered or manually supplied name, then the identifier the
/// device reports about itself, then the bare IP.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceRegistry {
    devices: IndexMap<String, Device>,
    names: BTreeMap<String, String>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a persisted ip -> name map. No devices are created.
    pub fn with_names(names: BTreeMap<String, String>) -> Self {
        Self {
            devices: IndexMap::new(),
            names,
        }
    }

    /// Insert a device, or refresh the name of an existing one.
    ///
    /// An empty `proposed` name counts as no name. For an existing device a
    /// proposed name only replaces the current one while that is still the
    /// bare IP, so repeated upserts never undo a better name.
    pub fn upsert(&mut self, ip: &str, proposed: Option<&str>) -> &Device {
        let proposed = proposed.map(str::trim).filter(|n| !n.is_empty());
        let persisted = self.names.get(ip).filter(|n| !n.is_empty()).cloned();

        let device = self.devices.entry(ip.to_owned()).or_insert_with(|| {
            debug!(ip, "tracking new device");
            Device::new(ip)
        });

        if let Some(name) = persisted {
            device.name = name;
        } else if let Some(name) = proposed {
            if device.is_unnamed() {
                device.name = name.to_owned();
            }
        }

        device
    }

    /// All devices in first-seen order.
    pub fn ordered_devices(&self) -> impl ExactSizeIterator<Item = &Device> {
        self.devices.values()
    }

    /// Record the outcome of a poll. Unknown IPs are ignored.
    ///
    /// A failure keeps the last good reading and only sets the error.
    pub fn record_reading(
        &mut self,
        ip: &str,
        result: Result<SensorData, String>,
        now: DateTime<Local>,
    ) {
        let Some(device) = self.devices.get_mut(ip) else {
            trace!(ip, "reading for unknown device dropped");
            return;
        };
        match result {
            Ok(reading) => {
                device.reading = Some(reading);
                device.last_error = None;
                device.last_update = Some(now);
            }
            Err(message) => {
                device.last_error = Some(message);
            }
        }
    }

    /// Store a device's config and fall back to its reported identifier
    /// for the name if it has none yet.
    pub fn attach_config(&mut self, ip: &str, config: DeviceConfig) {
        let Some(device) = self.devices.get_mut(ip) else {
            trace!(ip, "config for unknown device dropped");
            return;
        };
        if !config.device_uuid.is_empty() && device.is_unnamed() {
            device.name.clone_from(&config.device_uuid);
        }
        device.config = Some(config);
    }

    /// Update the persisted name for `ip`. Applies to the device right away
    /// if it is already tracked.
    pub fn set_persisted_name(&mut self, ip: &str, name: &str) {
        self.names.insert(ip.to_owned(), name.to_owned());
        if let Some(device) = self.devices.get_mut(ip) {
            name.clone_into(&mut device.name);
        }
    }

    pub fn persisted_names(&self) -> &BTreeMap<String, String> {
        &self.names
    }

    pub fn contains(&self, ip: &str) -> bool {
        self.devices.contains_key(ip)
    }

    pub fn get(&self, ip: &str) -> Option<&Device> {
        self.devices.get(ip)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
