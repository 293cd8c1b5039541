//! In-memory rolling-window state for the telemetry aggregator.
//!
//! [`WindowStore`] keeps one capacity-bounded [`window::SensorWindow`] per
//! sensor and derives moving averages incrementally. [`alert_log::AlertLog`]
//! is the bounded FIFO behind the alert query surface. Both are plain
//! synchronous structures: the server wraps each in an `Arc<Mutex<_>>` so
//! that every update is applied as one atomic unit with respect to
//! concurrent readers, and readers only ever receive snapshot copies.

pub mod alert_log;
pub mod window;

#[cfg(test)]
mod tests;

use sensormon_common::types::{Reading, SensorSnapshot};
use std::collections::HashMap;
use window::SensorWindow;

/// Registry of per-sensor rolling windows.
///
/// Windows are created lazily on the first reading for a sensor id and are
/// never retired; the registry lives for the lifetime of the process and is
/// rebuilt from the stream after a restart.
pub struct WindowStore {
    window_capacity: usize,
    windows: HashMap<String, SensorWindow>,
}

impl WindowStore {
    pub fn new(window_capacity: usize) -> Self {
        Self {
            window_capacity,
            windows: HashMap::new(),
        }
    }

    /// Applies one reading: appends it to the sensor's window (creating the
    /// window if absent), evicts beyond capacity, and returns the post-update
    /// snapshot with count and averages in agreement.
    pub fn update(&mut self, reading: Reading) -> SensorSnapshot {
        let sensor_id = reading.sensor_id.clone();
        let window = self
            .windows
            .entry(sensor_id.clone())
            .or_insert_with(|| SensorWindow::new(self.window_capacity));
        window.push(&sensor_id, reading)
    }

    /// Point-in-time copy of every known sensor's current state.
    pub fn snapshot_all(&self) -> HashMap<String, SensorSnapshot> {
        self.windows
            .iter()
            .filter_map(|(id, window)| window.snapshot(id).map(|s| (id.clone(), s)))
            .collect()
    }

    /// Snapshot of a single sensor, if it has been observed.
    pub fn snapshot(&self, sensor_id: &str) -> Option<SensorSnapshot> {
        self.windows.get(sensor_id)?.snapshot(sensor_id)
    }

    /// Number of distinct sensors observed so far.
    pub fn sensor_count(&self) -> usize {
        self.windows.len()
    }
}
