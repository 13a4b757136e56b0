use tlsgrade_common::config::PollPolicy;
use tlsgrade_common::domain::Domain;
use tlsgrade_common::models::host::Host;
use tokio::time::{self, Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::lifecycle::{self, Phase};
use super::{AnalysisError, Stage};
use crate::ports::{AssessmentClient, ProgressReporter, ResultStore};
use crate::progress;

/// Drives a started assessment to a terminal status.
///
/// Status checks are strictly sequential. Between two checks the poller
/// sleeps for the current cadence; the sleep and every request race the
/// cancellation token, and the wall-clock budget is checked before each
/// request and again before its reply is used.
pub struct Poller<'a> {
    client: &'a dyn AssessmentClient,
    store: &'a dyn ResultStore,
    reporter: &'a dyn ProgressReporter,
    policy: PollPolicy,
    started: Instant,
}

impl<'a> Poller<'a> {
    pub fn new(
        client: &'a dyn AssessmentClient,
        store: &'a dyn ResultStore,
        reporter: &'a dyn ProgressReporter,
        policy: PollPolicy,
    ) -> Self {
        Self {
            client,
            store,
            reporter,
            policy,
            started: Instant::now(),
        }
    }

    /// Measures the wait budget from `started` instead of from construction.
    pub fn started_at(mut self, started: Instant) -> Self {
        self.started = started;
        self
    }

    pub async fn poll(
        &self,
        domain: &Domain,
        initial: Host,
        cancel: &CancellationToken,
    ) -> Result<Host, AnalysisError> {
        if initial.is_terminal() {
            return lifecycle::finish(domain, initial);
        }

        let mut interval: Duration = self.policy.initial_interval;

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(self.cancelled(domain)),
                _ = time::sleep(interval) => {}
            }

            self.ensure_within_budget(domain)?;

            let host = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(self.cancelled(domain)),
                result = self.client.check_status(domain) => {
                    result.map_err(AnalysisError::transport(domain, Stage::StatusCheck))?
                }
            };
            // A reply that arrives after the budget is spent is discarded.
            let elapsed = self.ensure_within_budget(domain)?;
            debug!(%domain, status = %host.status, ?elapsed, "status check");

            self.persist(domain, &host);

            match lifecycle::phase(&host.status) {
                Phase::Resolving => interval = self.policy.initial_interval,
                Phase::Running => {
                    interval = self.policy.running_interval;
                    progress::report_host(self.reporter, &host);
                }
                Phase::Succeeded | Phase::Failed => return lifecycle::finish(domain, host),
            }
        }
    }

    fn ensure_within_budget(&self, domain: &Domain) -> Result<Duration, AnalysisError> {
        let elapsed = self.started.elapsed();
        if elapsed > self.policy.max_wait {
            return Err(AnalysisError::Timeout {
                domain: domain.to_string(),
                elapsed,
                limit: self.policy.max_wait,
            });
        }
        Ok(elapsed)
    }

    fn persist(&self, domain: &Domain, host: &Host) {
        if let Err(e) = self.store.save(domain, host) {
            warn!("Could not save result to local cache: {e}");
        }
    }

    fn cancelled(&self, domain: &Domain) -> AnalysisError {
        AnalysisError::Cancelled {
            domain: domain.to_string(),
            elapsed: self.started.elapsed(),
        }
    }
}
