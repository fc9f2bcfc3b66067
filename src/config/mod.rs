//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) or built-in defaults
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → MonitorConfig (validated, immutable)
//!     → endpoints handed to the poller at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the service list is never reloaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{ListenerConfig, LogFormat, MonitorConfig, ObservabilityConfig, PollingConfig};
pub use validation::{validate_config, ValidationError};
