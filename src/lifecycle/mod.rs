//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Seed store → Bind listener → Spawn poller → Serve
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C → watch flag → poller exits, server drains → Exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds before the poller starts

pub mod shutdown;

pub use shutdown::Shutdown;
