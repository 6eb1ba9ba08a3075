//! Dashboard engine for networked air quality sensors.
//!
//! Everything here is independent of the terminal:
//!
//! - **[`sensor`]**: the sensor catalog, quality ratings and value formatting.
//! - **[`DeviceRegistry`]**: insertion-ordered device map with the name
//!   precedence rules (persisted > discovered/manual > device id > IP).
//! - **[`EventLog`]**: bounded log of dashboard events.
//! - **[`Poller`]**: spawns one task per fetch and reports results as
//!   [`PollEvent`]s through the caller's channel.
//! - **[`discovery`]**: mDNS browsing for sensors on the local network.

pub mod discovery;
pub mod error;
pub mod log;
pub mod model;
pub mod poller;
pub mod registry;
pub mod sensor;

// ── Primary re-exports ──────────────────────────────────────────────
pub use discovery::DiscoveredDevice;
pub use error::CoreError;
pub use log::{EventLog, LogEntry};
pub use model::Device;
pub use poller::{PollEvent, Poller, SensorApi};
pub use registry::DeviceRegistry;
pub use sensor::{Sensor, TempUnit, Tier};

// Transport types consumers need without depending on the api crate.
pub use airdeck_api::{AirClient, DeviceConfig, SensorData, TransportConfig};
