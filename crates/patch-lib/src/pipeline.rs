//! The fetch → locate → build pipeline

use crate::client::WorkloadSource;
use crate::error::{PatchError, Result};
use crate::locator::{find_workload, parse_workloads, DEFAULT_NAMESPACE};
use crate::models::{PatchDocument, WorkloadRecommendation};
use crate::observability::PipelineLogger;
use crate::patch::{build_patch, container_patch};
use serde_json::Value;
use std::time::Instant;

/// What to build a patch for
#[derive(Debug, Clone)]
pub struct PatchRequest {
    pub cluster_id: String,
    pub name: String,
    pub namespace: String,
    pub container: Option<String>,
}

impl PatchRequest {
    pub fn new(cluster_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            cluster_id: cluster_id.into(),
            name: name.into(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            container: None,
        }
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn container(mut self, container: Option<String>) -> Self {
        self.container = container;
        self
    }
}

/// Fetch recommendations for the request's cluster and build its patch
pub async fn generate_patch(
    source: &dyn WorkloadSource,
    request: &PatchRequest,
) -> Result<PatchDocument> {
    let logger = PipelineLogger::new(&request.cluster_id);
    logger.log_fetch_started();

    let started = Instant::now();
    let response = match source.fetch_workloads(&request.cluster_id).await {
        Ok(response) => response,
        Err(e) => {
            logger.log_fetch_failed(&e);
            return Err(e);
        }
    };

    let workload_count = response
        .get("workloads")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    logger.log_fetch_completed(workload_count, started.elapsed());

    build_from_response(
        response,
        &request.name,
        &request.namespace,
        request.container.as_deref(),
        &logger,
    )
}

/// Build a patch from an already-decoded response body, without any I/O
pub fn patch_from_response(
    response: Value,
    name: &str,
    namespace: &str,
    container: Option<&str>,
) -> Result<PatchDocument> {
    build_from_response(
        response,
        name,
        namespace,
        container,
        &PipelineLogger::new("-"),
    )
}

fn build_from_response(
    response: Value,
    name: &str,
    namespace: &str,
    container: Option<&str>,
    logger: &PipelineLogger,
) -> Result<PatchDocument> {
    let list = parse_workloads(response)?;

    let Some(workload) = find_workload(&list, name, namespace) else {
        logger.log_workload_missing(name, namespace);
        return Err(PatchError::NotFound {
            name: name.to_string(),
            namespace: namespace.to_string(),
        });
    };
    logger.log_workload_located(
        &workload.name,
        &workload.namespace,
        workload.containers.len(),
    );

    match build_patch(workload, container)? {
        Some(doc) => {
            log_skipped(workload, container, logger);
            logger.log_patch_built(
                &doc.metadata.name,
                &doc.metadata.namespace,
                doc.containers().len(),
            );
            Ok(doc)
        }
        None => {
            logger.log_patch_empty(&workload.name, &workload.namespace);
            Err(PatchError::EmptyPatch(workload.name.clone()))
        }
    }
}

fn log_skipped(
    workload: &WorkloadRecommendation,
    filter: Option<&str>,
    logger: &PipelineLogger,
) {
    workload
        .containers
        .iter()
        .filter(|c| filter.map_or(true, |f| c.name == f))
        .filter(|c| matches!(container_patch(c), Ok(None)))
        .for_each(|c| logger.log_container_skipped(&workload.name, &c.name));
}

/// Serialize a patch: compact, or indented by two spaces when `pretty`
pub fn render_patch(patch: &PatchDocument, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(patch)
    } else {
        serde_json::to_string(patch)
    };
    rendered.map_err(PatchError::Serialize)
}
