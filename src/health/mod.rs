//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Polling loop (poller.rs):
//!     Fixed-interval cycle
//!     → Probe each service (probe.rs)
//!     → Update state.rs
//!
//! State store (state.rs):
//!     Down/unknown ←→ Up
//!     Uptime marker set on the way up, cleared on the way down
//!
//! Snapshot (snapshot.rs):
//!     Read every entry → derive uptime at read time
//!     → status feed, metrics export, dashboard
//! ```
//!
//! # Design Decisions
//! - One writer (the poller), any number of readers
//! - Health state is per-service; updates lock a single entry
//! - Probe failures are data, never errors

pub mod poller;
pub mod probe;
pub mod snapshot;
pub mod state;

pub use poller::Poller;
pub use probe::{HttpProbe, Probe, ProbeResult, ServiceEndpoint, StatusCategory};
pub use snapshot::{SignalView, Snapshot};
pub use state::{ServiceSignal, SignalStore, Transition};
