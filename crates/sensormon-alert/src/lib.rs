//! Threshold anomaly detection for sensor readings.
//!
//! [`evaluate`] is a pure function of a post-update snapshot and the
//! configured [`Thresholds`]: same snapshot in, same decision out, no state
//! carried between calls. Both checks are evaluated independently and may
//! fire together in a single alert.

#[cfg(test)]
mod tests;

use sensormon_common::types::{Alert, SensorSnapshot};
use serde::{Deserialize, Serialize};

/// Breach thresholds for the two monitored quantities.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Thresholds {
    /// Temperature above this value (°C) fires an alert.
    #[serde(default = "default_temp_threshold")]
    pub temp_threshold: f64,
    /// Relative humidity above this value (%) fires an alert.
    #[serde(default = "default_humidity_threshold")]
    pub humidity_threshold: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            temp_threshold: default_temp_threshold(),
            humidity_threshold: default_humidity_threshold(),
        }
    }
}

fn default_temp_threshold() -> f64 {
    35.0
}

fn default_humidity_threshold() -> f64 {
    90.0
}

/// Evaluates the latest reading in `snapshot` against the thresholds.
///
/// Returns an [`Alert`] carrying every fired reason (temperature check
/// first, then humidity), or `None` when nothing breached.
pub fn evaluate(snapshot: &SensorSnapshot, thresholds: &Thresholds) -> Option<Alert> {
    let reading = &snapshot.latest;
    let mut reasons = Vec::new();

    if reading.temperature > thresholds.temp_threshold {
        reasons.push(format!("High temperature: {:.1}°C", reading.temperature));
    }
    if reading.humidity > thresholds.humidity_threshold {
        reasons.push(format!("High humidity: {:.1}%", reading.humidity));
    }

    if reasons.is_empty() {
        return None;
    }

    Some(Alert {
        sensor_id: reading.sensor_id.clone(),
        location: reading.location.clone(),
        temperature: reading.temperature,
        humidity: reading.humidity,
        timestamp: reading.timestamp.clone(),
        reasons,
    })
}
