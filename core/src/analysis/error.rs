use std::fmt;
use std::time::Duration;

use thiserror::Error;
use tlsgrade_common::domain::ValidationError;

use crate::ports::ClientError;

/// The remote call a transport failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ServiceInfo,
    Start,
    StatusCheck,
    EndpointDetails,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ServiceInfo => "service availability check",
            Self::Start => "analysis start",
            Self::StatusCheck => "status check",
            Self::EndpointDetails => "endpoint details request",
        })
    }
}

/// Why an analysis run did not produce a `READY` result.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("concurrent assessment limit reached ({current}/{max})")]
    CapacityExceeded { current: i32, max: i32 },

    #[error("{stage} failed for {domain}: {source}")]
    Transport {
        domain: String,
        stage: Stage,
        #[source]
        source: ClientError,
    },

    #[error("analysis of {domain} finished with error: {message}")]
    RemoteJob { domain: String, message: String },

    #[error("maximum wait time exceeded for {domain}: gave up after {elapsed:?} (limit {limit:?})")]
    Timeout {
        domain: String,
        elapsed: Duration,
        limit: Duration,
    },

    #[error("analysis of {domain} cancelled after {elapsed:?}")]
    Cancelled { domain: String, elapsed: Duration },
}

impl AnalysisError {
    pub(crate) fn transport(domain: &impl fmt::Display, stage: Stage) -> impl FnOnce(ClientError) -> Self {
        let domain = domain.to_string();
        move |source| Self::Transport { domain, stage, source }
    }
}
