use crate::state::AppState;
use sensormon_bus::consumer::{decode_reading, ReadingConsumer};
use sensormon_bus::error::BusError;
use sensormon_bus::publisher::AlertPublisher;
use sensormon_common::types::Alert;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Decode one bus payload and fold it into the shared state.
///
/// Returns the alert raised by the reading, if any. The alert is already
/// recorded in the log when this returns; republishing is the caller's
/// concern.
pub fn apply_payload(
    state: &AppState,
    payload: &[u8],
) -> sensormon_bus::error::Result<Option<Alert>> {
    let reading = decode_reading(payload)?;

    let snapshot = state
        .store
        .lock()
        .unwrap_or_else(|p| p.into_inner())
        .update(reading);

    tracing::debug!(
        sensor_id = %snapshot.sensor_id,
        location = %snapshot.location,
        avg_temperature = snapshot.avg_temperature,
        avg_humidity = snapshot.avg_humidity,
        reading_count = snapshot.reading_count,
        "processed reading"
    );

    let alert = sensormon_alert::evaluate(&snapshot, &state.thresholds);

    if let Some(alert) = &alert {
        state
            .alert_log
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .record(alert.clone());
        tracing::warn!(
            sensor_id = %alert.sensor_id,
            location = %alert.location,
            reason = %alert.reason(),
            "threshold breached"
        );
    }

    Ok(alert)
}

/// The single writer of the window store and alert log.
///
/// Runs until shutdown is signalled or, when an error budget is
/// configured, until too many consecutive bus errors accumulate.
pub struct IngestLoop {
    state: AppState,
    consumer: ReadingConsumer,
    publisher: Arc<dyn AlertPublisher>,
    shutdown: watch::Receiver<bool>,
}

impl IngestLoop {
    pub fn new(
        state: AppState,
        consumer: ReadingConsumer,
        publisher: Arc<dyn AlertPublisher>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            state,
            consumer,
            publisher,
            shutdown,
        }
    }

    pub async fn run(mut self) {
        let error_budget = self.state.config.bus.max_consecutive_errors;
        let mut consecutive_errors: u32 = 0;

        tracing::info!("Ingestion loop started");

        loop {
            let polled = tokio::select! {
                _ = self.shutdown.changed() => {
                    tracing::info!("Shutdown signalled, stopping ingestion");
                    break;
                }
                polled = self.consumer.poll() => polled,
            };

            match polled {
                Ok(payload) => {
                    consecutive_errors = 0;
                    match apply_payload(&self.state, &payload) {
                        Ok(Some(alert)) => {
                            // The alert is already in the local log; a failed
                            // republish must not take the loop down.
                            if let Err(e) = self.publisher.publish(&alert).await {
                                tracing::error!(
                                    sensor_id = %alert.sensor_id,
                                    error = %e,
                                    "Failed to republish alert, kept locally"
                                );
                            }
                        }
                        Ok(None) => {}
                        Err(e) => {
                            tracing::warn!(error = %e, "Discarding malformed message");
                        }
                    }
                }
                Err(BusError::MissingPayload) => {
                    tracing::warn!("Discarding message without payload");
                }
                Err(e) if e.is_transient() => {}
                Err(e) => {
                    consecutive_errors += 1;
                    tracing::error!(
                        error = %e,
                        consecutive_errors,
                        "Bus error while polling"
                    );
                    if error_budget > 0 && consecutive_errors >= error_budget {
                        tracing::error!(
                            error_budget,
                            "Consecutive error budget exhausted, stopping ingestion"
                        );
                        break;
                    }
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
            }
        }

        self.state.ingest_running.store(false, Ordering::SeqCst);
        tracing::info!("Ingestion loop stopped");
    }
}
