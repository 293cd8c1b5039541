use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single sensor reading as delivered on the readings topic.
///
/// The serde renames are the wire shape: producers publish PascalCase keys.
/// `timestamp` is an opaque producer-provided string and is passed through
/// unmodified, never reparsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reading {
    #[serde(rename = "SensorId")]
    pub sensor_id: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Temperature")]
    pub temperature: f64,
    #[serde(rename = "Humidity")]
    pub humidity: f64,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
}

/// Immutable point-in-time view of one sensor's rolling window, taken after
/// an update has been fully applied.
///
/// `avg_temperature` / `avg_humidity` are always consistent with
/// `reading_count`: both were computed under the same store lock.
#[derive(Debug, Clone, Serialize)]
pub struct SensorSnapshot {
    pub sensor_id: String,
    /// Last-seen location for the sensor (overwritten on every update).
    pub location: String,
    pub avg_temperature: f64,
    pub avg_humidity: f64,
    /// Timestamp of the most recent reading (opaque string).
    pub last_update: String,
    /// Number of readings currently retained in the window.
    pub reading_count: usize,
    /// The reading that produced this snapshot.
    pub latest: Reading,
}

/// A threshold-breach alert produced by the anomaly detector.
///
/// Immutable once constructed. `reasons` holds every fired breach reason in
/// evaluation order (temperature check first, then humidity).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub sensor_id: String,
    pub location: String,
    pub temperature: f64,
    pub humidity: f64,
    pub timestamp: String,
    pub reasons: Vec<String>,
}

impl Alert {
    /// All fired reasons joined into one human-readable string.
    pub fn reason(&self) -> String {
        self.reasons.join(", ")
    }
}

/// Outbound alert payload published to the alerts topic and returned by the
/// query surface, with the camelCase keys downstream consumers expect.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlertPayload {
    pub sensor_id: String,
    pub location: String,
    pub temperature: f64,
    pub humidity: f64,
    pub timestamp: String,
    /// Fired reasons joined with `", "`.
    pub reason: String,
}

impl From<&Alert> for AlertPayload {
    fn from(alert: &Alert) -> Self {
        Self {
            sensor_id: alert.sensor_id.clone(),
            location: alert.location.clone(),
            temperature: alert.temperature,
            humidity: alert.humidity,
            timestamp: alert.timestamp.clone(),
            reason: alert.reason(),
        }
    }
}
