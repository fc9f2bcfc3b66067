//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!
//! Scrape request:
//!     → SignalStore::snapshot
//!     → metrics.rs (gauges rendered as Prometheus text)
//! ```

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
pub use metrics::SnapshotExporter;
