//! # Analysis Service
//!
//! Implements the "assess a domain" use case:
//!
//! 1. **Validate** the requested name ([`Domain::parse`]).
//! 2. **Gate** on service capacity ([`gate::ensure_capacity`]).
//! 3. **Start** the remote job and classify its first status ([`lifecycle`]).
//! 4. **Short-circuit** through the [`ResultStore`] when a finished result
//!    for the domain is already stored.
//! 5. **Poll** until the job is terminal ([`poller::Poller`]).
//!
//! Nothing touches the network before step 1 succeeds.

pub mod error;
pub mod gate;
pub mod lifecycle;
pub mod poller;

use std::future::Future;

use tlsgrade_common::config::PollPolicy;
use tlsgrade_common::domain::Domain;
use tlsgrade_common::models::host::{Endpoint, Host};
use tlsgrade_common::models::info::ServiceInfo;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::ports::{AssessmentClient, ClientError, ProgressReporter, ResultStore};

pub use error::{AnalysisError, Stage};
pub use poller::Poller;

pub struct AnalysisService {
    client: Box<dyn AssessmentClient>,
    store: Box<dyn ResultStore>,
    reporter: Box<dyn ProgressReporter>,
    policy: PollPolicy,
}

impl AnalysisService {
    pub fn new(
        client: Box<dyn AssessmentClient>,
        store: Box<dyn ResultStore>,
        reporter: Box<dyn ProgressReporter>,
    ) -> Self {
        Self {
            client,
            store,
            reporter,
            policy: PollPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Runs a full analysis of `domain` and returns its `READY` result.
    pub async fn run(&self, domain: &str, cancel: &CancellationToken) -> Result<Host, AnalysisError> {
        let started = Instant::now();
        let domain = Domain::parse(domain)?;

        let capacity = cancellable(cancel, &domain, started, self.client.capacity())
            .await?
            .map_err(AnalysisError::transport(&domain, Stage::ServiceInfo))?;
        gate::ensure_capacity(capacity)?;
        debug!(
            current = capacity.current_assessments,
            max = capacity.max_assessments,
            "service has capacity"
        );

        let host = cancellable(cancel, &domain, started, self.client.start_analysis(&domain))
            .await?
            .map_err(AnalysisError::transport(&domain, Stage::Start))?;
        info!("Analysis of {domain} started, status {}", host.status);

        if !host.is_terminal()
            && let Some(cached) = self.cached_result(&domain)
        {
            info!("Using cached result for {domain}");
            return lifecycle::finish(&domain, cached);
        }

        Poller::new(
            self.client.as_ref(),
            self.store.as_ref(),
            self.reporter.as_ref(),
            self.policy,
        )
        .started_at(started)
        .poll(&domain, host, cancel)
        .await
    }

    /// A stored result that can stand in for polling: it loads, belongs to
    /// `domain` and is terminal. Its age is not checked.
    fn cached_result(&self, domain: &Domain) -> Option<Host> {
        if !self.store.exists(domain) {
            return None;
        }

        match self.store.load(domain) {
            Ok(host) if host.is_terminal() => Some(host),
            Ok(host) => {
                debug!(status = %host.status, "cached result is not final, polling instead");
                None
            }
            Err(e) => {
                warn!("Could not load cached result: {e}");
                None
            }
        }
    }

    pub async fn service_info(&self) -> Result<ServiceInfo, ClientError> {
        self.client.service_info().await
    }

    /// Details of one endpoint of `domain`'s latest assessment.
    pub async fn endpoint_details(
        &self,
        domain: &str,
        ip_address: &str,
    ) -> Result<Endpoint, AnalysisError> {
        let domain = Domain::parse(domain)?;
        self.client
            .endpoint_details(&domain, ip_address)
            .await
            .map_err(AnalysisError::transport(&domain, Stage::EndpointDetails))
    }
}

/// Awaits `request` unless `cancel` fires first.
async fn cancellable<T>(
    cancel: &CancellationToken,
    domain: &Domain,
    started: Instant,
    request: impl Future<Output = T>,
) -> Result<T, AnalysisError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(AnalysisError::Cancelled {
            domain: domain.to_string(),
            elapsed: started.elapsed(),
        }),
        output = request => Ok(output),
    }
}
