use sensormon_alert::Thresholds;
use sensormon_bus::BusConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    #[serde(default)]
    pub bus: BusConfig,
    #[serde(default)]
    pub aggregate: AggregateConfig,
    #[serde(default)]
    pub alert: Thresholds,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: default_http_port(),
            bus: BusConfig::default(),
            aggregate: AggregateConfig::default(),
            alert: Thresholds::default(),
        }
    }
}

/// Capacity bounds for the in-memory rolling state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateConfig {
    /// Max readings retained per sensor window.
    #[serde(default = "default_window_capacity")]
    pub window_capacity: usize,
    /// Max alerts retained in the alert log.
    #[serde(default = "default_alert_log_capacity")]
    pub alert_log_capacity: usize,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            window_capacity: default_window_capacity(),
            alert_log_capacity: default_alert_log_capacity(),
        }
    }
}

fn default_http_port() -> u16 {
    8000
}

fn default_window_capacity() -> usize {
    150
}

fn default_alert_log_capacity() -> usize {
    100
}

impl ServerConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}
