use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use sensormon_common::types::AlertPayload;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::Ordering;
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

/// Per-sensor aggregate view, rounded for presentation.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SensorAggregate {
    pub sensor_id: String,
    pub location: String,
    /// Moving average over the retained window, rounded to one decimal.
    pub avg_temperature: f64,
    /// Moving average over the retained window, rounded to one decimal.
    pub avg_humidity: f64,
    /// Timestamp of the most recent reading, verbatim from the producer.
    pub last_update: String,
    pub reading_count: usize,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// "ok" while ingestion is live, "degraded" once it has stopped.
    pub status: String,
    pub version: String,
    pub uptime_secs: i64,
    pub sensor_count: usize,
    pub ingestion: String,
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Service health and ingestion status
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service health", body = HealthResponse)
    )
)]
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let sensor_count = state
        .store
        .lock()
        .unwrap_or_else(|p| p.into_inner())
        .sensor_count();
    let running = state.ingest_running.load(Ordering::SeqCst);

    Json(HealthResponse {
        status: if running { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: (Utc::now() - state.start_time).num_seconds(),
        sensor_count,
        ingestion: if running { "running" } else { "stopped" }.to_string(),
    })
}

/// Current aggregates for every known sensor
#[utoipa::path(
    get,
    path = "/api/aggregates",
    tag = "Aggregates",
    responses(
        (status = 200, description = "Aggregates keyed by sensor ID", body = HashMap<String, SensorAggregate>)
    )
)]
async fn get_aggregates(State(state): State<AppState>) -> Json<HashMap<String, SensorAggregate>> {
    // One lock acquisition covers every sensor, so a single response is
    // never a mix of pre- and post-update values for the same reading.
    let snapshots = state
        .store
        .lock()
        .unwrap_or_else(|p| p.into_inner())
        .snapshot_all();

    let aggregates = snapshots
        .into_iter()
        .map(|(sensor_id, snap)| {
            let aggregate = SensorAggregate {
                sensor_id: snap.sensor_id,
                location: snap.location,
                avg_temperature: round1(snap.avg_temperature),
                avg_humidity: round1(snap.avg_humidity),
                last_update: snap.last_update,
                reading_count: snap.reading_count,
            };
            (sensor_id, aggregate)
        })
        .collect();

    Json(aggregates)
}

/// Recent alerts, oldest first
#[utoipa::path(
    get,
    path = "/api/alerts",
    tag = "Alerts",
    responses(
        (status = 200, description = "Retained alerts in arrival order", body = Vec<AlertPayload>)
    )
)]
async fn get_alerts(State(state): State<AppState>) -> Json<Vec<AlertPayload>> {
    let alerts = state
        .alert_log
        .lock()
        .unwrap_or_else(|p| p.into_inner())
        .recent();

    Json(alerts.iter().map(AlertPayload::from).collect())
}

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health))
        .routes(routes!(get_aggregates))
        .routes(routes!(get_alerts))
}
