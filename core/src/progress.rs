use tlsgrade_common::models::host::Host;
use tracing::info;

use crate::ports::{EndpointProgress, ProgressReporter};

/// Progress entries of a running assessment, skipping endpoints the
/// service has not started on yet (negative progress).
pub fn endpoint_progress(host: &Host) -> impl Iterator<Item = EndpointProgress> + '_ {
    host.endpoints
        .iter()
        .filter(|endpoint| endpoint.progress >= 0)
        .map(|endpoint| EndpointProgress {
            ip_address: endpoint.ip_address.clone(),
            progress: endpoint.progress,
            status_details: endpoint.status_details_message.clone(),
        })
}

/// Sends every entry of `host` to `reporter`.
pub fn report_host(reporter: &dyn ProgressReporter, host: &Host) {
    for progress in endpoint_progress(host) {
        reporter.report(&progress);
    }
}

/// Reports progress as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl ProgressReporter for LogReporter {
    fn report(&self, progress: &EndpointProgress) {
        info!(
            "[{}] Progress: {}% - {}",
            progress.ip_address, progress.progress, progress.status_details
        );
    }
}
