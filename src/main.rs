//! Service monitor.
//!
//! Polls a fixed set of HTTP services and exposes their health, latency and
//! uptime as a JSON status feed, Prometheus gauges and a dashboard.
//!
//! # Architecture Overview
//!
//! ```text
//!   config ──▶ Poller ──probe──▶ services
//!                 │
//!                 ▼ update (one entry at a time)
//!            SignalStore ◀── snapshot ── HTTP handlers ──▶ /status, /metrics, /
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use service_monitor::config::{load_config, validate_config, ConfigError, MonitorConfig};
use service_monitor::health::SignalStore;
use service_monitor::http::HttpServer;
use service_monitor::lifecycle::Shutdown;
use service_monitor::observability::init_logging;

#[derive(Parser)]
#[command(name = "service-monitor")]
#[command(about = "Health, latency and uptime monitor for a fixed set of services", long_about = None)]
struct Args {
    /// Path to a TOML config file; built-in defaults are used when omitted.
    #[arg(short, long, env = "MONITOR_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => {
            let config = MonitorConfig::default();
            validate_config(&config).map_err(ConfigError::Validation)?;
            config
        }
    };

    init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        services = config.services.len(),
        interval_secs = config.polling.interval_secs,
        timeout_secs = config.polling.timeout_secs,
        "Configuration loaded"
    );
    for (id, address) in &config.services {
        tracing::info!(service = %id, address = %address, "Monitoring service");
    }

    let store = Arc::new(SignalStore::with_services(config.services.keys().cloned()));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Shutdown signal received");
                trigger.trigger();
            }
            Err(e) => tracing::error!(error = %e, "Failed to listen for Ctrl+C"),
        }
    });

    let server = HttpServer::new(config, store)?;
    server.run(listener, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
