//! Metrics exposition.
//!
//! # Metrics
//! - `service_health` (gauge): 1=up, 0=down, per `service`
//! - `service_latency_ms` (gauge): latency of the latest probe
//! - `service_uptime_seconds` (gauge): length of the current up streak
//!
//! # Design Decisions
//! - Gauges are written from a snapshot at scrape time, never from the poller
//! - The recorder is owned by the exporter instead of installed globally
//! - Publishing a snapshot and rendering it happen under one lock, so
//!   concurrent scrapes never mix gauges from different snapshots

use std::sync::Mutex;

use metrics::{describe_gauge, gauge, with_local_recorder};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusRecorder};

use crate::health::Snapshot;

pub const SERVICE_HEALTH: &str = "service_health";
pub const SERVICE_LATENCY_MS: &str = "service_latency_ms";
pub const SERVICE_UPTIME_SECONDS: &str = "service_uptime_seconds";

/// Content type of the Prometheus text exposition format.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Renders snapshots as Prometheus gauges.
pub struct SnapshotExporter {
    recorder: Mutex<PrometheusRecorder>,
}

impl SnapshotExporter {
    pub fn new() -> Self {
        let recorder = PrometheusBuilder::new().build_recorder();

        with_local_recorder(&recorder, || {
            describe_gauge!(
                SERVICE_HEALTH,
                "Health status of monitored services (1=up, 0=down)."
            );
            describe_gauge!(
                SERVICE_LATENCY_MS,
                "HTTP latency to monitored services in milliseconds."
            );
            describe_gauge!(
                SERVICE_UPTIME_SECONDS,
                "Uptime of monitored services in seconds."
            );
        });

        Self {
            recorder: Mutex::new(recorder),
        }
    }

    /// Publish the snapshot and return the text exposition.
    pub fn render(&self, snapshot: &Snapshot) -> String {
        let recorder = self.recorder.lock().unwrap_or_else(|e| e.into_inner());

        with_local_recorder(&*recorder, || {
            for (service, view) in snapshot {
                gauge!(SERVICE_HEALTH, "service" => service.clone()).set(f64::from(view.health));
                gauge!(SERVICE_LATENCY_MS, "service" => service.clone()).set(view.latency_ms);
                gauge!(SERVICE_UPTIME_SECONDS, "service" => service.clone())
                    .set(view.uptime_seconds);
            }
        });

        recorder.handle().render()
    }
}

impl Default for SnapshotExporter {
    fn default() -> Self {
        Self::new()
    }
}
