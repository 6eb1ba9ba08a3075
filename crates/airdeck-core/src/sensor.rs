// ── Sensor catalog, ratings and display formatting ──
//
// Pure functions only. Ratings for temperature channels are always computed
// in °F so the display unit never moves a reading between tiers.

use airdeck_api::SensorData;
use strum::{EnumIter, IntoStaticStr};

/// Quality tier for a single sensor value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr)]
pub enum Tier {
    Good,
    Fair,
    Poor,
}

/// Unit used for on-screen temperatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TempUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

/// Optimal range for a sensor, expressed in the rating unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorRange {
    pub min: f64,
    pub max: f64,
}

/// Every channel a sensor can report, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Sensor {
    Temp,
    Humid,
    Co2,
    Voc,
    Pm25,
    DewPoint,
    AbsHumid,
    Co2Est,
    Pm10Est,
}

impl Sensor {
    pub fn range(self) -> SensorRange {
        let (min, max) = match self {
            Self::Temp => (68.0, 77.0),
            Self::DewPoint => (50.0, 65.0),
            Self::Humid => (40.0, 50.0),
            Self::AbsHumid => (4.0, 12.0),
            Self::Co2 | Self::Co2Est => (0.0, 600.0),
            Self::Voc => (0.0, 300.0),
            Self::Pm25 => (0.0, 12.0),
            Self::Pm10Est => (0.0, 50.0),
        };
        SensorRange { min, max }
    }

    /// Unit of the rating scale (temperatures rate in °F).
    pub fn unit(self) -> &'static str {
        match self {
            Self::Temp | Self::DewPoint => "°F",
            Self::Humid => "%",
            Self::AbsHumid => "g/m³",
            Self::Co2 | Self::Co2Est => "ppm",
            Self::Voc => "ppb",
            Self::Pm25 | Self::Pm10Est => "µg/m³",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Temp => "Temperature",
            Self::DewPoint => "Dew Point",
            Self::Humid => "Humidity",
            Self::AbsHumid => "Abs Humidity",
            Self::Co2 => "CO₂",
            Self::Co2Est => "CO₂ (est)",
            Self::Voc => "VOC",
            Self::Pm25 => "PM2.5",
            Self::Pm10Est => "PM10 (est)",
        }
    }

    pub fn is_temperature(self) -> bool {
        matches!(self, Self::Temp | Self::DewPoint)
    }

    /// Raw value of this channel in a reading, if the device reported it.
    pub fn value_in(self, data: &SensorData) -> Option<f64> {
        match self {
            Self::Temp => Some(data.temp),
            Self::Humid => Some(data.humid),
            Self::Co2 => Some(data.co2),
            Self::Voc => Some(data.voc),
            Self::Pm25 => Some(data.pm25),
            Self::DewPoint => data.dew_point,
            Self::AbsHumid => data.abs_humid,
            Self::Co2Est => data.co2_est,
            Self::Pm10Est => data.pm10_est,
        }
    }

    /// Convert a raw device value into the rating unit.
    pub fn rating_value(self, raw: f64) -> f64 {
        if self.is_temperature() {
            c_to_f(raw)
        } else {
            raw
        }
    }

    /// Rate a value already expressed in the rating unit.
    pub fn rate(self, value: f64) -> Tier {
        let SensorRange { min, max } = self.range();
        match self {
            Self::Temp | Self::DewPoint => rate_band(value, min, max, 5.0),
            Self::Humid => rate_band(value, min, max, 10.0),
            Self::AbsHumid => {
                if (min..=max).contains(&value) {
                    Tier::Good
                } else {
                    Tier::Fair
                }
            }
            Self::Co2 | Self::Co2Est | Self::Voc | Self::Pm25 | Self::Pm10Est => {
                if value <= max {
                    Tier::Good
                } else if value <= max * 2.0 {
                    Tier::Fair
                } else {
                    Tier::Poor
                }
            }
        }
    }

    /// Rate a raw device value (°C for temperatures).
    pub fn rate_raw(self, raw: f64) -> Tier {
        self.rate(self.rating_value(raw))
    }

    /// Format a raw device value for display.
    pub fn format(self, raw: f64, unit: TempUnit) -> String {
        match self {
            Self::Temp | Self::DewPoint => match unit {
                TempUnit::Celsius => format!("{raw:.1}°C"),
                TempUnit::Fahrenheit => format!("{:.1}°F", c_to_f(raw)),
            },
            Self::Humid => format!("{raw:.1}{}", self.unit()),
            Self::AbsHumid => format!("{raw:.1} {}", self.unit()),
            _ => format!("{:.0} {}", raw.round(), self.unit()),
        }
    }

    /// Fill ratio (0..=1) for the sensor's bar, from a rating-unit value.
    pub fn bar_ratio(self, value: f64) -> f64 {
        let ratio = match self {
            Self::Temp => (value - 50.0) / 54.0,
            Self::DewPoint => (value - 30.0) / 50.0,
            Self::Humid => value / 100.0,
            Self::AbsHumid => value / 25.0,
            Self::Co2 | Self::Co2Est => value / 2500.0,
            Self::Voc => value / 1500.0,
            Self::Pm25 => value / 100.0,
            Self::Pm10Est => value / 200.0,
        };
        ratio.clamp(0.0, 1.0)
    }
}

fn rate_band(value: f64, min: f64, max: f64, tolerance: f64) -> Tier {
    if (min..=max).contains(&value) {
        return Tier::Good;
    }
    let dist = if value > max { value - max } else { min - value };
    if dist <= tolerance {
        Tier::Fair
    } else {
        Tier::Poor
    }
}

/// Celsius to Fahrenheit.
pub fn c_to_f(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

/// Channels present in a reading, in display order, paired with raw values.
pub fn present_sensors(data: &SensorData) -> Vec<(Sensor, f64)> {
    use strum::IntoEnumIterator;

    Sensor::iter()
        .filter_map(|s| s.value_in(data).map(|v| (s, v)))
        .collect()
}

/// Tier for the device's overall 0..100 score.
pub fn score_tier(score: i64) -> Tier {
    if score >= 80 {
        Tier::Good
    } else if score >= 60 {
        Tier::Fair
    } else {
        Tier::Poor
    }
}

/// Human label for the overall score.
pub fn score_label(score: i64) -> &'static str {
    score_tier(score).into()
}
