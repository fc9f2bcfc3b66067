//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the monitor.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::validation::ValidationError;
use crate::health::ServiceEndpoint;

/// Root configuration for the service monitor.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Listener configuration for the metrics/status/dashboard server.
    pub listener: ListenerConfig,

    /// Polling loop cadence and probe bounds.
    pub polling: PollingConfig,

    /// Monitored services: identifier -> base address.
    pub services: BTreeMap<String, String>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        let services = [
            ("frontend", "http://localhost:3000"),
            ("backend", "http://localhost:4000"),
            ("chat", "http://localhost:8081"),
        ]
        .into_iter()
        .map(|(id, addr)| (id.to_string(), addr.to_string()))
        .collect();

        Self {
            listener: ListenerConfig::default(),
            polling: PollingConfig::default(),
            services,
            observability: ObservabilityConfig::default(),
        }
    }
}

impl MonitorConfig {
    /// Convert the service table into endpoints, ordered by identifier.
    pub fn endpoints(&self) -> Result<Vec<ServiceEndpoint>, ValidationError> {
        self.services
            .iter()
            .map(|(id, address)| ServiceEndpoint::parse(id, address))
            .collect()
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Timeout for serving a single request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Polling loop configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Pause between the end of one cycle and the start of the next, in seconds.
    pub interval_secs: u64,

    /// Upper bound for a single probe, in seconds.
    pub timeout_secs: u64,

    /// User-Agent header sent with every probe.
    pub user_agent: String,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: 10,
            timeout_secs: 5,
            user_agent: concat!("service-monitor/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_stock_deployment() {
        let config = MonitorConfig::default();
        assert_eq!(config.polling.interval_secs, 10);
        assert_eq!(config.services.len(), 3);
        assert_eq!(config.services["chat"], "http://localhost:8081");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: MonitorConfig = toml::from_str(
            r#"
            [polling]
            interval_secs = 30

            [services]
            api = "http://10.0.0.5:9000/healthz"
            "#,
        )
        .unwrap();

        assert_eq!(config.polling.interval_secs, 30);
        assert_eq!(config.polling.timeout_secs, 5);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.services.len(), 1);
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_only_monitor_sections_are_serialized() {
        let text = toml::to_string(&MonitorConfig::default()).unwrap();
        for section in ["[listener]", "[polling]", "[services]", "[observability]"] {
            assert!(text.contains(section), "missing {}", section);
        }
        assert!(!text.contains("[search]"));
    }

    #[test]
    fn test_endpoints_are_ordered_by_id() {
        let config = MonitorConfig::default();
        let ids: Vec<_> = config
            .endpoints()
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["backend", "chat", "frontend"]);
    }
}
