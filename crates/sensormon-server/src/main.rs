use anyhow::Result;
use sensormon_bus::consumer::ReadingConsumer;
use sensormon_bus::publisher::{AlertPublisher, KafkaAlertPublisher};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::watch;
use tokio::time::Duration;
use tracing_subscriber::EnvFilter;

use sensormon_server::app;
use sensormon_server::config::ServerConfig;
use sensormon_server::ingest::IngestLoop;
use sensormon_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("sensormon=info".parse()?))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let config = match args.get(1) {
        Some(path) => ServerConfig::load(path)?,
        None if Path::new("config/server.toml").exists() => {
            ServerConfig::load("config/server.toml")?
        }
        None => {
            tracing::info!("No config file given, using defaults");
            ServerConfig::default()
        }
    };

    tracing::info!(
        http_port = config.http_port,
        brokers = %config.bus.brokers,
        readings_topic = %config.bus.readings_topic,
        alerts_topic = %config.bus.alerts_topic,
        "sensormon-server starting"
    );

    // Build bus endpoints before the config moves into shared state
    let consumer = ReadingConsumer::new(&config.bus)?;
    let publisher: Arc<dyn AlertPublisher> = Arc::new(KafkaAlertPublisher::new(&config.bus)?);

    let state = AppState::new(config);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let ingest = IngestLoop::new(state.clone(), consumer, publisher, shutdown_rx);
    let ingest_handle = tokio::spawn(ingest.run());

    let http_addr: SocketAddr = format!("0.0.0.0:{}", state.config.http_port).parse()?;
    let app = app::build_http_app(state.clone());
    let http_listener = tokio::net::TcpListener::bind(http_addr).await?;

    tracing::info!(http = %http_addr, "Server started");

    let http_server = axum::serve(http_listener, app)
        .with_graceful_shutdown(async {
            signal::ctrl_c().await.ok();
        });
    if let Err(e) = http_server.await {
        tracing::error!(error = %e, "HTTP server error");
    }

    tracing::info!("Shutting down gracefully");
    let _ = shutdown_tx.send(true);
    if tokio::time::timeout(Duration::from_secs(5), ingest_handle)
        .await
        .is_err()
    {
        tracing::warn!("Ingestion loop did not stop in time");
    }
    tracing::info!("Server stopped");

    Ok(())
}
