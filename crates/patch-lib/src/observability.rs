//! Structured logging for the recommendation-to-patch pipeline
//!
//! Every event carries an `event` field and the cluster it belongs to, so a
//! run can be followed in JSON logs as easily as on a terminal. Failures are
//! logged at `info`; the caller owns the user-facing diagnostic.

use crate::error::PatchError;
use std::error::Error as _;
use std::time::Duration;
use tracing::{debug, info};

/// Structured logger for pipeline events
#[derive(Clone)]
pub struct PipelineLogger {
    cluster_id: String,
}

impl PipelineLogger {
    pub fn new(cluster_id: impl Into<String>) -> Self {
        Self {
            cluster_id: cluster_id.into(),
        }
    }

    pub fn log_fetch_started(&self) {
        debug!(
            event = "fetch_started",
            cluster_id = %self.cluster_id,
            "Fetching workload recommendations"
        );
    }

    pub fn log_fetch_completed(&self, workload_count: usize, elapsed: Duration) {
        info!(
            event = "fetch_completed",
            cluster_id = %self.cluster_id,
            workload_count = workload_count,
            elapsed_ms = elapsed.as_millis() as u64,
            "Fetched workload recommendations"
        );
    }

    pub fn log_fetch_failed(&self, error: &PatchError) {
        info!(
            event = "fetch_failed",
            cluster_id = %self.cluster_id,
            error = %error,
            cause = ?error.source().map(|s| s.to_string()),
            "Failed to fetch workload recommendations"
        );
    }

    pub fn log_workload_located(&self, name: &str, namespace: &str, containers: usize) {
        debug!(
            event = "workload_located",
            cluster_id = %self.cluster_id,
            workload = %name,
            namespace = %namespace,
            containers = containers,
            "Located workload"
        );
    }

    pub fn log_workload_missing(&self, name: &str, namespace: &str) {
        info!(
            event = "workload_not_found",
            cluster_id = %self.cluster_id,
            workload = %name,
            namespace = %namespace,
            "Workload not present in response"
        );
    }

    /// Log a container left out of the patch for lack of recommendations
    pub fn log_container_skipped(&self, workload: &str, container: &str) {
        debug!(
            event = "container_skipped",
            cluster_id = %self.cluster_id,
            workload = %workload,
            container = %container,
            "Container has no resource recommendation"
        );
    }

    pub fn log_patch_built(&self, workload: &str, namespace: &str, containers: usize) {
        info!(
            event = "patch_built",
            cluster_id = %self.cluster_id,
            workload = %workload,
            namespace = %namespace,
            containers = containers,
            "Built resource patch"
        );
    }

    pub fn log_patch_empty(&self, workload: &str, namespace: &str) {
        info!(
            event = "patch_empty",
            cluster_id = %self.cluster_id,
            workload = %workload,
            namespace = %namespace,
            "No container carries a recommendation"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_logger_creation() {
        let logger = PipelineLogger::new("cluster-1");
        assert_eq!(logger.cluster_id, "cluster-1");

        // Without a subscriber these are no-ops, but must not panic
        logger.log_fetch_started();
        logger.log_fetch_completed(3, Duration::from_millis(12));
        logger.log_patch_built("api", "default", 2);
    }
}
