use crate::error::{BusError, Result};
use crate::BusConfig;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::Message;
use sensormon_common::types::Reading;

/// Decodes one readings-topic payload into a [`Reading`].
///
/// Missing or wrong-typed required fields surface as [`BusError::Json`];
/// the caller discards the message and keeps polling.
pub fn decode_reading(payload: &[u8]) -> Result<Reading> {
    Ok(serde_json::from_slice(payload)?)
}

/// Single consumer subscribed to the readings topic.
pub struct ReadingConsumer {
    inner: StreamConsumer,
}

impl ReadingConsumer {
    pub fn new(config: &BusConfig) -> Result<Self> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("group.id", &config.group_id)
            .set("enable.auto.commit", "true")
            .set("auto.offset.reset", &config.auto_offset_reset)
            .set("session.timeout.ms", "6000")
            .set("enable.partition.eof", "false")
            .create()?;
        consumer.subscribe(&[&config.readings_topic])?;

        tracing::info!(
            brokers = %config.brokers,
            topic = %config.readings_topic,
            group = %config.group_id,
            "Reading consumer subscribed"
        );

        Ok(Self { inner: consumer })
    }

    /// Awaits the next message and returns its raw payload bytes.
    pub async fn poll(&self) -> Result<Vec<u8>> {
        let message = self.inner.recv().await?;
        let payload = message.payload().ok_or(BusError::MissingPayload)?;
        Ok(payload.to_vec())
    }
}
