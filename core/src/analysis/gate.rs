use tlsgrade_common::models::info::ServiceCapacity;

use super::AnalysisError;

/// Refuses to start a job while the service is saturated.
///
/// Advisory only: the service enforces its own quota and may still reject
/// the start request, which then surfaces as a transport error.
pub fn ensure_capacity(capacity: ServiceCapacity) -> Result<(), AnalysisError> {
    if capacity.is_saturated() {
        return Err(AnalysisError::CapacityExceeded {
            current: capacity.current_assessments,
            max: capacity.max_assessments,
        });
    }
    Ok(())
}
