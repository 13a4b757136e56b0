//! Lifecycle of a remote assessment.
//!
//! ```text
//!   DNS ⇄ IN_PROGRESS ──► READY
//!    │         │
//!    └─────────┴───────► ERROR
//! ```
//!
//! The service alone decides transitions; this module only classifies each
//! reported status and turns terminal snapshots into the run's outcome.

use tlsgrade_common::domain::Domain;
use tlsgrade_common::models::host::{AnalysisStatus, Host};
use tracing::warn;

use super::AnalysisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The service is still resolving the domain.
    Resolving,
    /// Endpoints are being assessed.
    Running,
    Succeeded,
    Failed,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

pub fn phase(status: &AnalysisStatus) -> Phase {
    match status {
        AnalysisStatus::Dns => Phase::Resolving,
        AnalysisStatus::InProgress => Phase::Running,
        AnalysisStatus::Ready => Phase::Succeeded,
        AnalysisStatus::Error => Phase::Failed,
        AnalysisStatus::Unknown(raw) => {
            warn!("Unexpected analysis status {raw:?}, waiting as if in progress");
            Phase::Running
        }
    }
}

/// Outcome of a terminal snapshot: the result itself, or the remote
/// failure carrying the service's status message.
pub fn finish(domain: &Domain, host: Host) -> Result<Host, AnalysisError> {
    match host.status {
        AnalysisStatus::Error => Err(AnalysisError::RemoteJob {
            domain: domain.to_string(),
            message: host.status_message,
        }),
        _ => Ok(host),
    }
}
