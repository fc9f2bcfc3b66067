//! Single timed health-check request.
//!
//! # Responsibilities
//! - Issue one bounded GET against a service endpoint
//! - Measure wall-clock time from dispatch to response, error or timeout
//! - Classify the outcome; never touch shared state
//!
//! # Design Decisions
//! - Transport errors, timeouts and status >= 400 are all failures
//! - Redirects are not followed; a 3xx answer means the service is up
//! - No retries: the polling cadence is the retry policy

use std::future::Future;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::time;
use url::Url;

use crate::config::{PollingConfig, ValidationError};

/// A monitored service: unique identifier plus target address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    pub id: String,
    pub target: Url,
}

impl ServiceEndpoint {
    /// Parse a configured address. Only plain `http` targets are accepted.
    pub fn parse(id: &str, address: &str) -> Result<Self, ValidationError> {
        if id.is_empty() {
            return Err(ValidationError::EmptyServiceId);
        }

        let target = Url::parse(address).map_err(|e| ValidationError::InvalidAddress {
            id: id.to_string(),
            address: address.to_string(),
            reason: e.to_string(),
        })?;

        if target.scheme() != "http" {
            return Err(ValidationError::UnsupportedScheme {
                id: id.to_string(),
                scheme: target.scheme().to_string(),
            });
        }

        Ok(Self {
            id: id.to_string(),
            target,
        })
    }
}

/// Coarse classification of how a probe ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    Informational,
    Success,
    Redirection,
    ClientError,
    ServerError,
    /// Connection refused, DNS failure, malformed exchange.
    Transport,
    /// No response within the probe bound.
    Timeout,
}

impl StatusCategory {
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            100..=199 => StatusCategory::Informational,
            200..=299 => StatusCategory::Success,
            300..=399 => StatusCategory::Redirection,
            400..=499 => StatusCategory::ClientError,
            _ => StatusCategory::ServerError,
        }
    }

    /// Whether this outcome counts as the service being up.
    pub fn is_up(self) -> bool {
        matches!(
            self,
            StatusCategory::Informational | StatusCategory::Success | StatusCategory::Redirection
        )
    }
}

/// Outcome of one probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeResult {
    pub succeeded: bool,
    /// Elapsed time of the attempt, measured on failure as well.
    pub elapsed_millis: f64,
    pub status: StatusCategory,
}

impl ProbeResult {
    pub fn new(status: StatusCategory, elapsed: Duration) -> Self {
        Self {
            succeeded: status.is_up(),
            elapsed_millis: elapsed.as_secs_f64() * 1000.0,
            status,
        }
    }
}

/// Something that can check a service once.
///
/// Implementations must bound their own running time and must not mutate
/// monitoring state; the poller applies the result.
pub trait Probe: Send + Sync {
    fn probe(&self, endpoint: &ServiceEndpoint) -> impl Future<Output = ProbeResult> + Send;
}

/// HTTP GET probe over a plain-HTTP connector.
pub struct HttpProbe {
    client: Client<HttpConnector, Body>,
    timeout: Duration,
    user_agent: String,
}

impl HttpProbe {
    pub fn new(timeout: Duration, user_agent: impl Into<String>) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        Self {
            client,
            timeout,
            user_agent: user_agent.into(),
        }
    }

    pub fn from_config(config: &PollingConfig) -> Self {
        Self::new(
            Duration::from_secs(config.timeout_secs),
            config.user_agent.clone(),
        )
    }
}

impl Probe for HttpProbe {
    async fn probe(&self, endpoint: &ServiceEndpoint) -> ProbeResult {
        let start = Instant::now();

        let request = match Request::builder()
            .method("GET")
            .uri(endpoint.target.as_str())
            .header(header::USER_AGENT, self.user_agent.as_str())
            .body(Body::empty())
        {
            Ok(req) => req,
            Err(e) => {
                tracing::error!(service = %endpoint.id, error = %e, "Failed to build probe request");
                return ProbeResult::new(StatusCategory::Transport, start.elapsed());
            }
        };

        let status = match time::timeout(self.timeout, self.client.request(request)).await {
            Ok(Ok(response)) => StatusCategory::from_status(response.status()),
            Ok(Err(e)) => {
                tracing::debug!(service = %endpoint.id, error = %e, "Probe connection error");
                StatusCategory::Transport
            }
            Err(_) => StatusCategory::Timeout,
        };

        ProbeResult::new(status, start.elapsed())
    }
}
