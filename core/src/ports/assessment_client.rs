use async_trait::async_trait;
use thiserror::Error;
use tlsgrade_common::domain::Domain;
use tlsgrade_common::models::host::{Endpoint, Host};
use tlsgrade_common::models::info::{ServiceCapacity, ServiceInfo};

/// Failures of the remote assessment API.
///
/// Service-side conditions (rate limiting, overload, maintenance) get their
/// own variants so callers can report them precisely.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("could not decode {what} response: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid request (400): {0}")]
    InvalidRequest(String),
    #[error("rate limit exceeded (429): too many requests, wait before retrying")]
    RateLimited,
    #[error("internal server error (500)")]
    ServerError,
    #[error("service unavailable (503): under maintenance")]
    Unavailable,
    #[error("service overloaded (529): try again later")]
    Overloaded,
    #[error("unexpected HTTP status: {0}")]
    UnexpectedStatus(u16),
}

/// Gateway to the remote TLS assessment service.
#[async_trait]
pub trait AssessmentClient: Send + Sync {
    /// Engine version, criteria version and current load of the service.
    async fn service_info(&self) -> Result<ServiceInfo, ClientError>;

    /// Starts a new assessment of `domain`, or attaches to the running one.
    ///
    /// Full details are requested for every endpoint.
    async fn start_analysis(&self, domain: &Domain) -> Result<Host, ClientError>;

    /// Reads the current state of the assessment without restarting it.
    async fn check_status(&self, domain: &Domain) -> Result<Host, ClientError>;

    /// Full details of one endpoint of a finished assessment.
    async fn endpoint_details(
        &self,
        domain: &Domain,
        ip_address: &str,
    ) -> Result<Endpoint, ClientError>;

    async fn capacity(&self) -> Result<ServiceCapacity, ClientError> {
        Ok(self.service_info().await?.capacity())
    }
}
