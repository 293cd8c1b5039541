//! Shared domain types for the sensormon telemetry aggregator.

pub mod types;
