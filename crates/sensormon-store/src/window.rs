use sensormon_common::types::{Reading, SensorSnapshot};
use std::collections::VecDeque;

/// Capacity-bounded FIFO of recent readings for one sensor, with running
/// sums for O(1) average maintenance.
///
/// Eviction is purely count-based: when a push would exceed the capacity the
/// oldest reading is dropped and its contribution subtracted from the sums.
/// Float drift from long runs of add/subtract is an accepted approximation.
pub struct SensorWindow {
    capacity: usize,
    readings: VecDeque<Reading>,
    sum_temperature: f64,
    sum_humidity: f64,
    location: String,
    last_update: String,
}

impl SensorWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            readings: VecDeque::with_capacity(capacity.max(1)),
            sum_temperature: 0.0,
            sum_humidity: 0.0,
            location: String::new(),
            last_update: String::new(),
        }
    }

    /// Appends a reading, evicts the oldest beyond capacity, and returns the
    /// post-update snapshot. The returned snapshot is built entirely from the
    /// state as it stands after this call, so count and averages agree.
    pub fn push(&mut self, sensor_id: &str, reading: Reading) -> SensorSnapshot {
        self.location = reading.location.clone();
        self.last_update = reading.timestamp.clone();
        self.sum_temperature += reading.temperature;
        self.sum_humidity += reading.humidity;
        self.readings.push_back(reading.clone());

        while self.readings.len() > self.capacity {
            if let Some(evicted) = self.readings.pop_front() {
                self.sum_temperature -= evicted.temperature;
                self.sum_humidity -= evicted.humidity;
            }
        }

        let count = self.readings.len();
        SensorSnapshot {
            sensor_id: sensor_id.to_string(),
            location: self.location.clone(),
            avg_temperature: self.sum_temperature / count as f64,
            avg_humidity: self.sum_humidity / count as f64,
            last_update: self.last_update.clone(),
            reading_count: count,
            latest: reading,
        }
    }

    /// Snapshot of the current state, or `None` for a window that has never
    /// seen a reading (windows are only created on first observation, so
    /// callers going through the store never hit this).
    pub fn snapshot(&self, sensor_id: &str) -> Option<SensorSnapshot> {
        let latest = self.readings.back()?;
        let count = self.readings.len();
        Some(SensorSnapshot {
            sensor_id: sensor_id.to_string(),
            location: self.location.clone(),
            avg_temperature: self.sum_temperature / count as f64,
            avg_humidity: self.sum_humidity / count as f64,
            last_update: self.last_update.clone(),
            reading_count: count,
            latest: latest.clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}
