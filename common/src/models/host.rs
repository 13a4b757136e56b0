use std::fmt;

use serde::{Deserialize, Serialize};

use super::details::EndpointDetails;
use super::null_as_default;

/// Status of a remote assessment, as reported by the service.
///
/// Statuses the service may add in the future are kept verbatim in
/// [`AnalysisStatus::Unknown`] so they survive a round trip through the cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnalysisStatus {
    Dns,
    InProgress,
    Ready,
    Error,
    Unknown(String),
}

impl AnalysisStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready | Self::Error)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Dns => "DNS",
            Self::InProgress => "IN_PROGRESS",
            Self::Ready => "READY",
            Self::Error => "ERROR",
            Self::Unknown(raw) => raw,
        }
    }
}

impl Default for AnalysisStatus {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl From<String> for AnalysisStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "DNS" => Self::Dns,
            "IN_PROGRESS" => Self::InProgress,
            "READY" => Self::Ready,
            "ERROR" => Self::Error,
            _ => Self::Unknown(raw),
        }
    }
}

impl From<AnalysisStatus> for String {
    fn from(status: AnalysisStatus) -> Self {
        match status {
            AnalysisStatus::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of one assessment job. The API calls this a "host".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Host {
    #[serde(rename = "host")]
    pub domain: String,
    pub port: u16,
    pub protocol: String,
    pub is_public: bool,
    pub status: AnalysisStatus,
    pub status_message: String,
    /// Milliseconds since the Unix epoch.
    pub start_time: i64,
    /// Milliseconds since the Unix epoch.
    pub test_time: i64,
    pub engine_version: String,
    pub criteria_version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub endpoints: Vec<Endpoint>,
    #[serde(deserialize_with = "null_as_default")]
    pub cert_hostnames: Vec<String>,
}

impl Host {
    pub fn new(domain: impl Into<String>, status: AnalysisStatus) -> Self {
        Self {
            domain: domain.into(),
            status,
            ..Default::default()
        }
    }

    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Coarse bucket of an SSL Labs letter grade, used to pick a display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeClass {
    Good,
    Fair,
    Poor,
}

impl GradeClass {
    pub fn of(grade: &str) -> Self {
        if grade.starts_with('A') {
            Self::Good
        } else if grade.starts_with('B') {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

/// Status message the service uses for an endpoint whose assessment finished.
pub const ENDPOINT_READY: &str = "Ready";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Endpoint {
    pub ip_address: String,
    pub server_name: String,
    pub status_message: String,
    pub status_details: String,
    pub status_details_message: String,
    pub grade: String,
    pub grade_trust_ignored: String,
    pub has_warnings: bool,
    pub is_exceptional: bool,
    /// Percentage, or -1 when the service has not started on this endpoint.
    pub progress: i32,
    /// Milliseconds.
    pub duration: i64,
    pub eta: i32,
    pub delegation: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<EndpointDetails>,
}

impl Endpoint {
    pub fn new(ip_address: impl Into<String>) -> Self {
        Self {
            ip_address: ip_address.into(),
            ..Default::default()
        }
    }

    pub fn with_progress(mut self, progress: i32, details_message: impl Into<String>) -> Self {
        self.progress = progress;
        self.status_details_message = details_message.into();
        self
    }

    pub fn is_ready(&self) -> bool {
        self.status_message == ENDPOINT_READY
    }

    pub fn grade_class(&self) -> GradeClass {
        GradeClass::of(&self.grade)
    }

    /// The trust-ignored grade, when it tells something the main grade doesn't.
    pub fn distinct_trust_ignored_grade(&self) -> Option<&str> {
        let grade = self.grade_trust_ignored.as_str();
        (!grade.is_empty() && grade != self.grade).then_some(grade)
    }
}
