//! Service monitor library.

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod search;

pub use config::MonitorConfig;
pub use health::{SignalStore, Snapshot};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
