// airdeck-api: Async client for the local sensor HTTP API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::{AirClient, format_host};
pub use error::Error;
pub use models::{DeviceConfig, SensorData};
pub use transport::TransportConfig;
