//! Locating a single workload in the API response

use crate::error::{PatchError, Result};
use crate::models::{WorkloadList, WorkloadRecommendation};
use serde_json::Value;

/// Namespace used when none is given
pub const DEFAULT_NAMESPACE: &str = "default";

/// Check the decoded body against the expected schema
pub fn parse_workloads(value: Value) -> Result<WorkloadList> {
    match value.get("workloads") {
        None => return Err(PatchError::Schema("'workloads' field not found".to_string())),
        Some(workloads) if !workloads.is_array() => {
            return Err(PatchError::Schema("'workloads' field is not a list".to_string()))
        }
        Some(_) => {}
    }

    serde_json::from_value(value).map_err(|e| PatchError::Schema(e.to_string()))
}

/// Find a workload by name and namespace.
///
/// Scans in response order, so the first of any duplicates wins.
pub fn find_workload<'a>(
    list: &'a WorkloadList,
    name: &str,
    namespace: &str,
) -> Option<&'a WorkloadRecommendation> {
    list.workloads
        .iter()
        .find(|w| w.name == name && w.namespace == namespace)
}
