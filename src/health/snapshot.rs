//! Point-in-time view of all service signals.
//!
//! Uptime is derived at read time from the stored marker, so a snapshot taken
//! between poll cycles still reports current uptime. Each entry is copied under
//! its own lock and is never a torn write.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::time::Instant;

use serde::Serialize;

use crate::health::state::SignalStore;

/// Exported signals for one service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignalView {
    /// 1 = up, 0 = down or not yet polled.
    pub health: u8,
    #[serde(rename = "latency")]
    pub latency_ms: f64,
    #[serde(rename = "uptime")]
    pub uptime_seconds: f64,
}

/// Signals for every known service, keyed and ordered by identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Snapshot {
    services: BTreeMap<String, SignalView>,
}

impl Snapshot {
    pub fn get(&self, service_id: &str) -> Option<&SignalView> {
        self.services.get(service_id)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, SignalView> {
        self.services.iter()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = (&'a String, &'a SignalView);
    type IntoIter = btree_map::Iter<'a, String, SignalView>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl SignalStore {
    /// Snapshot of all services as of now.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_at(Instant::now())
    }

    /// Snapshot of all services, deriving uptime against `now`.
    pub fn snapshot_at(&self, now: Instant) -> Snapshot {
        let services = self
            .read_all()
            .into_iter()
            .map(|(id, signal)| {
                let view = SignalView {
                    health: signal.health(),
                    latency_ms: signal.latency_millis,
                    uptime_seconds: signal.uptime_seconds(now),
                };
                (id, view)
            })
            .collect();

        Snapshot { services }
    }
}
