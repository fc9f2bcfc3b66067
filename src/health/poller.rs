//! Polling loop.
//!
//! # Responsibilities
//! - Probe every configured service once per cycle
//! - Apply each result to the signal store
//! - Sleep a fixed interval between cycles, until shutdown

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tokio::sync::watch;
use tokio::time;

use crate::health::probe::{Probe, ServiceEndpoint};
use crate::health::state::{SignalStore, Transition};
use crate::lifecycle::Shutdown;

pub struct Poller<P> {
    endpoints: Vec<ServiceEndpoint>,
    probe: P,
    store: Arc<SignalStore>,
    interval: Duration,
}

impl<P: Probe> Poller<P> {
    pub fn new(
        endpoints: Vec<ServiceEndpoint>,
        probe: P,
        store: Arc<SignalStore>,
        interval: Duration,
    ) -> Self {
        Self {
            endpoints,
            probe,
            store,
            interval,
        }
    }

    pub async fn run(self, shutdown: watch::Receiver<bool>) {
        tracing::info!(
            services = self.endpoints.len(),
            interval_secs = self.interval.as_secs(),
            "Poller starting"
        );

        loop {
            tokio::select! {
                _ = self.poll_once() => {}
                _ = Shutdown::wait(shutdown.clone()) => break,
            }
            tokio::select! {
                _ = time::sleep(self.interval) => {}
                _ = Shutdown::wait(shutdown.clone()) => break,
            }
        }

        tracing::info!("Poller received shutdown signal, exiting loop");
    }

    /// Run one cycle: probe all services, then record every result.
    ///
    /// Probes run concurrently and each is bounded by the probe's own timeout,
    /// so one unreachable service cannot hold up the others.
    pub async fn poll_once(&self) {
        let probes = self.endpoints.iter().map(|endpoint| async move {
            let result = self.probe.probe(endpoint).await;
            let transition = self.store.update(&endpoint.id, &result);

            if !result.succeeded {
                tracing::warn!(
                    service = %endpoint.id,
                    target = %endpoint.target,
                    status = ?result.status,
                    latency_ms = result.elapsed_millis,
                    "Health check failed"
                );
            }
            match transition {
                Transition::CameUp => {
                    tracing::info!(service = %endpoint.id, "Service is up");
                }
                Transition::WentDown => {
                    tracing::info!(service = %endpoint.id, "Service went down");
                }
                Transition::StayedUp | Transition::StayedDown => {}
            }

            result.succeeded
        });

        let outcomes = join_all(probes).await;
        let up = outcomes.iter().filter(|ok| **ok).count();
        tracing::debug!(up, down = outcomes.len() - up, "Poll cycle complete");
    }
}
