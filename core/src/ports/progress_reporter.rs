/// Progress of one endpoint while an assessment is running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointProgress {
    pub ip_address: String,
    pub progress: i32,
    pub status_details: String,
}

/// Sink for progress updates. Best effort: implementations swallow their
/// own failures.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, progress: &EndpointProgress);
}
