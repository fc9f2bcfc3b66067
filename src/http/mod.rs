//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → handlers.rs
//!         GET /        → dashboard page (polls /status every 5s)
//!         GET /status  → JSON snapshot, cross-origin allowed
//!         GET /metrics → Prometheus text
//! ```

pub mod handlers;
pub mod server;

pub use server::{AppState, HttpServer};
