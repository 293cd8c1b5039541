use sensormon_common::types::Alert;
use std::collections::VecDeque;

/// Bounded FIFO of recent alerts, newest-last.
///
/// Same eviction policy as the sensor windows: capacity is the only bound,
/// the oldest entry is dropped once it is exceeded.
pub struct AlertLog {
    capacity: usize,
    alerts: VecDeque<Alert>,
}

impl AlertLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            alerts: VecDeque::with_capacity(capacity.max(1)),
        }
    }

    /// Appends an alert, evicting the oldest beyond capacity. Always
    /// completes locally; forwarding to the bus is the caller's concern.
    pub fn record(&mut self, alert: Alert) {
        self.alerts.push_back(alert);
        while self.alerts.len() > self.capacity {
            self.alerts.pop_front();
        }
    }

    /// Snapshot copy of the log in insertion order (newest-last), safe to
    /// hand to a reader while recording continues.
    pub fn recent(&self) -> Vec<Alert> {
        self.alerts.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}
