use crate::consumer::decode_reading;
use crate::error::BusError;
use crate::BusConfig;
use rdkafka::error::KafkaError;

#[test]
fn decode_valid_reading() {
    let payload = br#"{
        "SensorId": "sensor-7",
        "Location": "rooftop",
        "Temperature": 33.25,
        "Humidity": 71.0,
        "Timestamp": "2024-06-01T12:00:00Z"
    }"#;
    let reading = decode_reading(payload).unwrap();
    assert_eq!(reading.sensor_id, "sensor-7");
    assert_eq!(reading.temperature, 33.25);
}

#[test]
fn decode_rejects_missing_required_field() {
    // No SensorId.
    let payload = br#"{
        "Location": "rooftop",
        "Temperature": 33.0,
        "Humidity": 71.0,
        "Timestamp": "2024-06-01T12:00:00Z"
    }"#;
    assert!(matches!(decode_reading(payload), Err(BusError::Json(_))));
}

#[test]
fn decode_rejects_wrong_typed_field() {
    let payload = br#"{
        "SensorId": "sensor-7",
        "Location": "rooftop",
        "Temperature": "hot",
        "Humidity": 71.0,
        "Timestamp": "2024-06-01T12:00:00Z"
    }"#;
    assert!(matches!(decode_reading(payload), Err(BusError::Json(_))));
}

#[test]
fn decode_rejects_non_json_payload() {
    assert!(decode_reading(b"not json at all").is_err());
}

#[test]
fn timestamp_is_passed_through_opaquely() {
    // Not ISO-8601; the aggregator must not care.
    let payload = br#"{
        "SensorId": "sensor-7",
        "Location": "rooftop",
        "Temperature": 33.0,
        "Humidity": 71.0,
        "Timestamp": "epoch:1717243200/seq:42"
    }"#;
    let reading = decode_reading(payload).unwrap();
    assert_eq!(reading.timestamp, "epoch:1717243200/seq:42");
}

#[test]
fn partition_eof_is_transient() {
    let err = BusError::Kafka(KafkaError::PartitionEOF(3));
    assert!(err.is_transient());
    assert!(!BusError::MissingPayload.is_transient());
}

#[test]
fn bus_config_defaults_match_the_stream_contract() {
    let config = BusConfig::default();
    assert_eq!(config.brokers, "localhost:9092");
    assert_eq!(config.group_id, "sensormon-consumer");
    assert_eq!(config.readings_topic, "sensor-readings");
    assert_eq!(config.alerts_topic, "sensor-alerts");
    assert_eq!(config.auto_offset_reset, "earliest");
    assert_eq!(config.max_consecutive_errors, 0);
}
