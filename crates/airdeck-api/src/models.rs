// Sensor API response types
//
// Fields use `#[serde(default)]` liberally because older firmware omits
// several of the optional channels entirely.

use serde::{Deserialize, Serialize};

// ── Reading ──────────────────────────────────────────────────────────

/// Latest reading from `GET /air-data/latest`.
///
/// Temperatures are reported in °C. Required channels that are missing
/// from the payload decode as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorData {
    pub timestamp: String,
    pub score: i64,
    pub dew_point: Option<f64>,
    pub temp: f64,
    pub humid: f64,
    pub abs_humid: Option<f64>,
    pub co2: f64,
    pub co2_est: Option<f64>,
    pub co2_est_baseline: Option<f64>,
    pub voc: f64,
    pub voc_baseline: Option<f64>,
    pub voc_h2_raw: Option<f64>,
    pub voc_ethanol_raw: Option<f64>,
    pub pm25: f64,
    pub pm10_est: Option<f64>,
}

// ── Config ───────────────────────────────────────────────────────────

/// Static device settings from `GET /settings/config/data`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    pub device_uuid: String,
    pub wifi_mac: String,
    pub ssid: String,
    pub ip: String,
    pub netmask: String,
    pub gateway: String,
    pub fw_version: String,
    pub timezone: String,
    pub display: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn reading_with_optional_channels() {
        let raw = r#"{
            "timestamp": "2024-06-15T10:30:00.000Z",
            "score": 87,
            "dew_point": 11.2,
            "temp": 22.4,
            "humid": 45.1,
            "abs_humid": 9.0,
            "co2": 512,
            "co2_est": 430,
            "voc": 120,
            "pm25": 3,
            "pm10_est": 4
        }"#;
        let data: SensorData = serde_json::from_str(raw).unwrap();
        assert_eq!(data.score, 87);
        assert_eq!(data.dew_point, Some(11.2));
        assert_eq!(data.pm10_est, Some(4.0));
        assert!(data.voc_baseline.is_none());
    }

    #[test]
    fn missing_required_channels_default_to_zero() {
        let data: SensorData = serde_json::from_str(r#"{"score": 50}"#).unwrap();
        assert_eq!(data.score, 50);
        assert!(data.temp.abs() < f64::EPSILON);
        assert!(data.dew_point.is_none());
    }

    #[test]
    fn config_ignores_unknown_fields() {
        let raw = r#"{"device_uuid": "awair-element_1234", "fw_version": "1.4.0", "led": {}}"#;
        let cfg: DeviceConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(cfg.device_uuid, "awair-element_1234");
        assert_eq!(cfg.fw_version, "1.4.0");
        assert!(cfg.ssid.is_empty());
    }
}
