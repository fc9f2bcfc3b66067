//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the dashboard, status and metrics handlers
//! - Wire up middleware (tracing, timeout, request ID, CORS header)
//! - Spawn the polling loop alongside the server
//! - Bind server to listener and shut down gracefully

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{MonitorConfig, ValidationError};
use crate::health::{HttpProbe, Poller, ServiceEndpoint, SignalStore};
use crate::http::handlers::{get_dashboard, get_metrics, get_status};
use crate::lifecycle::Shutdown;
use crate::observability::SnapshotExporter;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SignalStore>,
    pub exporter: Arc<SnapshotExporter>,
}

/// HTTP server for the monitor.
pub struct HttpServer {
    router: Router,
    config: MonitorConfig,
    endpoints: Vec<ServiceEndpoint>,
    store: Arc<SignalStore>,
}

impl HttpServer {
    /// Create a new HTTP server over a shared signal store.
    pub fn new(config: MonitorConfig, store: Arc<SignalStore>) -> Result<Self, ValidationError> {
        let endpoints = config.endpoints()?;

        let state = AppState {
            store: store.clone(),
            exporter: Arc::new(SnapshotExporter::new()),
        };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            config,
            endpoints,
            store,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &MonitorConfig, state: AppState) -> Router {
        let status = Router::new()
            .route("/status", get(get_status))
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static("*"),
            ));

        Router::new()
            .route("/", get(get_dashboard))
            .route("/metrics", get(get_metrics))
            .merge(status)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.listener.request_timeout_secs,
                    )))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        let poller = Poller::new(
            self.endpoints,
            HttpProbe::from_config(&self.config.polling),
            self.store,
            Duration::from_secs(self.config.polling.interval_secs),
        );
        let poller_shutdown = shutdown.subscribe();
        tokio::spawn(async move {
            poller.run(poller_shutdown).await;
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(Shutdown::wait(shutdown.subscribe()))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
