//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Every service address parses as a plain `http` URL
//! - Validate value ranges (interval and timeouts > 0, bind address parses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MonitorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::MonitorConfig;
use crate::health::ServiceEndpoint;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("no services configured")]
    NoServices,

    #[error("service identifier must not be empty")]
    EmptyServiceId,

    #[error("service '{id}': invalid address '{address}': {reason}")]
    InvalidAddress {
        id: String,
        address: String,
        reason: String,
    },

    #[error("service '{id}': unsupported scheme '{scheme}' (only http is probed)")]
    UnsupportedScheme { id: String, scheme: String },

    #[error("polling.interval_secs must be greater than zero")]
    ZeroInterval,

    #[error("polling.timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("listener.request_timeout_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("listener.bind_address '{0}' is not a socket address")]
    InvalidBindAddress(String),
}

/// Check a parsed configuration, collecting every error found.
pub fn validate_config(config: &MonitorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.services.is_empty() {
        errors.push(ValidationError::NoServices);
    }
    for (id, address) in &config.services {
        if let Err(e) = ServiceEndpoint::parse(id, address) {
            errors.push(e);
        }
    }

    if config.polling.interval_secs == 0 {
        errors.push(ValidationError::ZeroInterval);
    }
    if config.polling.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }
    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
