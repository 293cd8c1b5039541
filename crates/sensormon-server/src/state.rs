use crate::config::ServerConfig;
use chrono::{DateTime, Utc};
use sensormon_alert::Thresholds;
use sensormon_store::alert_log::AlertLog;
use sensormon_store::WindowStore;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

/// Shared application state.
///
/// The window store and alert log are the only mutable shared resources.
/// The ingestion loop is their sole writer; query handlers take the lock
/// just long enough to copy a snapshot out.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<WindowStore>>,
    pub alert_log: Arc<Mutex<AlertLog>>,
    pub thresholds: Thresholds,
    /// Cleared by the ingestion loop when it enters its terminal state, so
    /// that `/health` can report the service as degraded.
    pub ingest_running: Arc<AtomicBool>,
    pub start_time: DateTime<Utc>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            store: Arc::new(Mutex::new(WindowStore::new(config.aggregate.window_capacity))),
            alert_log: Arc::new(Mutex::new(AlertLog::new(config.aggregate.alert_log_capacity))),
            thresholds: config.alert,
            ingest_running: Arc::new(AtomicBool::new(true)),
            start_time: Utc::now(),
            config: Arc::new(config),
        }
    }
}
