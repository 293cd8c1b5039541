use crate::error::Result;
use crate::BusConfig;
use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord};
use sensormon_common::types::{Alert, AlertPayload};
use std::time::Duration;

/// Outbound channel for alerts.
///
/// The ingestion loop records every alert locally before handing it here; a
/// publish failure is logged by the caller and never loses the local copy.
#[async_trait]
pub trait AlertPublisher: Send + Sync {
    async fn publish(&self, alert: &Alert) -> Result<()>;
}

/// Publishes alerts to the alerts topic, keyed by sensor id so that alerts
/// for one sensor land on one partition in order.
pub struct KafkaAlertPublisher {
    producer: FutureProducer,
    topic: String,
}

impl KafkaAlertPublisher {
    pub fn new(config: &BusConfig) -> Result<Self> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("acks", "all")
            .set("retries", "3")
            .create()?;
        Ok(Self {
            producer,
            topic: config.alerts_topic.clone(),
        })
    }
}

#[async_trait]
impl AlertPublisher for KafkaAlertPublisher {
    async fn publish(&self, alert: &Alert) -> Result<()> {
        let payload = serde_json::to_string(&AlertPayload::from(alert))?;
        let record = FutureRecord::to(&self.topic)
            .key(&alert.sensor_id)
            .payload(&payload);

        match self.producer.send(record, Duration::from_secs(5)).await {
            Ok((partition, offset)) => {
                tracing::debug!(
                    sensor_id = %alert.sensor_id,
                    partition,
                    offset,
                    "Alert published"
                );
                Ok(())
            }
            Err((e, _)) => Err(e.into()),
        }
    }
}
