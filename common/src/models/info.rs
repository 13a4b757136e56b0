use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Response of the `info` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceInfo {
    pub version: String,
    pub criteria_version: String,
    pub max_assessments: i32,
    pub current_assessments: i32,
    /// Milliseconds the client must wait between starting two assessments.
    pub new_assessment_cool_off: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub messages: Vec<String>,
}

impl ServiceInfo {
    pub fn capacity(&self) -> ServiceCapacity {
        ServiceCapacity {
            current_assessments: self.current_assessments,
            max_assessments: self.max_assessments,
        }
    }
}

/// Load of the assessment service, read once before starting a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceCapacity {
    pub current_assessments: i32,
    pub max_assessments: i32,
}

impl ServiceCapacity {
    pub fn is_saturated(&self) -> bool {
        self.current_assessments >= self.max_assessments
    }
}
