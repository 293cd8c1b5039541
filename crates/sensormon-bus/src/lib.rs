//! Message-bus edge: readings in, alerts out.
//!
//! The aggregator is a single Kafka consumer (no partition-rebalance logic)
//! feeding the ingestion loop, plus a producer that republishes alerts keyed
//! by sensor id. Payload decoding and the error taxonomy live here so that
//! the ingestion loop can classify failures without touching rdkafka types.

pub mod consumer;
pub mod error;
pub mod publisher;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

/// Bus connection settings, embedded in the server config under `[bus]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusConfig {
    /// Kafka bootstrap servers.
    #[serde(default = "default_brokers")]
    pub brokers: String,
    /// Consumer group id.
    #[serde(default = "default_group_id")]
    pub group_id: String,
    /// Topic the readings are consumed from.
    #[serde(default = "default_readings_topic")]
    pub readings_topic: String,
    /// Topic the alerts are published to.
    #[serde(default = "default_alerts_topic")]
    pub alerts_topic: String,
    /// Starting offset: "earliest" or "latest".
    #[serde(default = "default_auto_offset_reset")]
    pub auto_offset_reset: String,
    /// Consecutive receive failures before the ingestion loop gives up and
    /// reports itself stopped. `0` retries forever.
    #[serde(default)]
    pub max_consecutive_errors: u32,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            brokers: default_brokers(),
            group_id: default_group_id(),
            readings_topic: default_readings_topic(),
            alerts_topic: default_alerts_topic(),
            auto_offset_reset: default_auto_offset_reset(),
            max_consecutive_errors: 0,
        }
    }
}

fn default_brokers() -> String {
    "localhost:9092".to_string()
}

fn default_group_id() -> String {
    "sensormon-consumer".to_string()
}

fn default_readings_topic() -> String {
    "sensor-readings".to_string()
}

fn default_alerts_topic() -> String {
    "sensor-alerts".to_string()
}

fn default_auto_offset_reset() -> String {
    "earliest".to_string()
}
