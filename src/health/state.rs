//! Per-service signal state.
//!
//! # States
//! - Down/unknown: health 0, no uptime marker
//! - Up: health 1, uptime marker set when the streak began
//!
//! # State Transitions
//! ```text
//! unknown/down → up : marker set to now
//! up → up           : marker unchanged
//! up → down         : marker cleared
//! down → down       : marker stays unset
//! ```
//!
//! # Design Decisions
//! - Any single failure ends the streak; there is no hysteresis
//! - Latency is recorded for every attempt, successful or not
//! - Each service's tuple is replaced under its entry lock, so readers never
//!   see health from one probe paired with latency from another

use std::collections::BTreeMap;
use std::time::Instant;

use dashmap::DashMap;

use crate::health::probe::ProbeResult;

/// Current signals for one service.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ServiceSignal {
    pub healthy: bool,
    pub latency_millis: f64,
    /// Start of the current unbroken run of successful probes.
    pub uptime_started_at: Option<Instant>,
}

/// Which edge of the state table an update took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    CameUp,
    StayedUp,
    WentDown,
    StayedDown,
}

impl ServiceSignal {
    /// 1 when the last probe succeeded, 0 otherwise.
    pub fn health(&self) -> u8 {
        u8::from(self.healthy)
    }

    /// Seconds since the streak began, or 0 while down.
    pub fn uptime_seconds(&self, now: Instant) -> f64 {
        self.uptime_started_at
            .map(|started| now.saturating_duration_since(started).as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Apply one probe outcome observed at `now`.
    pub fn apply(&mut self, result: &ProbeResult, now: Instant) -> Transition {
        let was_up = self.healthy;
        self.latency_millis = result.elapsed_millis;

        if result.succeeded {
            self.healthy = true;
            if self.uptime_started_at.is_none() {
                self.uptime_started_at = Some(now);
            }
            if was_up {
                Transition::StayedUp
            } else {
                Transition::CameUp
            }
        } else {
            self.healthy = false;
            self.uptime_started_at = None;
            if was_up {
                Transition::WentDown
            } else {
                Transition::StayedDown
            }
        }
    }
}

/// Map of service identifier to its latest signals.
///
/// Written by the poller, read concurrently by request handlers. Entries are
/// created on first write (or seeded at startup) and never removed.
#[derive(Debug, Default)]
pub struct SignalStore {
    signals: DashMap<String, ServiceSignal>,
}

impl SignalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with a down/unset entry for every given identifier.
    pub fn with_services<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self::new();
        for id in ids {
            store.signals.entry(id.into()).or_default();
        }
        store
    }

    /// Apply a probe result using the current time.
    pub fn update(&self, service_id: &str, result: &ProbeResult) -> Transition {
        self.update_at(service_id, result, Instant::now())
    }

    /// Apply a probe result observed at `now`.
    pub fn update_at(&self, service_id: &str, result: &ProbeResult, now: Instant) -> Transition {
        // The entry guard holds the shard write lock for the whole tuple update.
        let mut signal = self.signals.entry(service_id.to_string()).or_default();
        signal.apply(result, now)
    }

    /// Latest signals for a service; the default down signal if never written.
    pub fn read(&self, service_id: &str) -> ServiceSignal {
        self.signals
            .get(service_id)
            .map(|entry| *entry.value())
            .unwrap_or_default()
    }

    /// Copy of every entry, ordered by identifier.
    pub fn read_all(&self) -> BTreeMap<String, ServiceSignal> {
        self.signals
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}
