use rdkafka::error::KafkaError;

/// Errors that can occur at the message-bus edge.
#[derive(Debug, thiserror::Error)]
pub enum BusError {
    /// Client-level Kafka failure (connection, poll, produce).
    #[error("Bus: Kafka error: {0}")]
    Kafka(#[from] KafkaError),

    /// Payload is not valid JSON or is missing a required field. Recoverable:
    /// the offending message is discarded and polling continues.
    #[error("Bus: malformed payload: {0}")]
    Json(#[from] serde_json::Error),

    /// A delivered message carried no payload at all.
    #[error("Bus: message has no payload")]
    MissingPayload,
}

impl BusError {
    /// Expected "no data" conditions that the ingestion loop ignores
    /// entirely, as opposed to real failures worth logging.
    pub fn is_transient(&self) -> bool {
        matches!(self, BusError::Kafka(KafkaError::PartitionEOF(_)))
    }
}

/// Convenience `Result` alias for bus operations.
pub type Result<T> = std::result::Result<T, BusError>;
