//! Conversion of recommendations into a Kubernetes resource patch

use crate::error::{PatchError, Result};
use crate::models::{
    ContainerPatch, ContainerRecommendation, PatchDocument, PatchMetadata, PatchSpec,
    PodSpecPatch, PodTemplatePatch, ResourceAmounts, ResourceQuantities, ResourceRequirements,
    WorkloadRecommendation, PATCH_API_VERSION,
};
use serde_json::Number;

const MIB_PER_GIB: f64 = 1024.0;

/// CPU cores as a Kubernetes quantity, keeping the number's exact text
pub fn cpu_quantity(cores: &Number) -> String {
    cores.to_string()
}

/// GiB as a whole number of mebibytes, truncated: `0.5` becomes `512Mi`.
///
/// Values whose mebibyte count does not fit an `i64` are rejected.
pub fn memory_quantity(gib: f64) -> Result<String> {
    let mib = (gib * MIB_PER_GIB).floor();
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
    if !mib.is_finite() || mib < i64::MIN as f64 || mib >= i64::MAX as f64 {
        return Err(PatchError::Schema(format!("memoryGib value {} is out of range", gib)));
    }
    Ok(format!("{}Mi", mib as i64))
}

fn quantities(amounts: Option<&ResourceAmounts>) -> Result<Option<ResourceQuantities>> {
    let Some(amounts) = amounts else {
        return Ok(None);
    };
    let quantities = ResourceQuantities {
        cpu: amounts.cpu_cores.as_ref().map(cpu_quantity),
        memory: amounts.memory_gib.map(memory_quantity).transpose()?,
    };
    Ok((!quantities.is_empty()).then_some(quantities))
}

/// Resource block for one container, or `None` if it recommends nothing
pub fn container_patch(container: &ContainerRecommendation) -> Result<Option<ContainerPatch>> {
    let Some(recommendation) = container.recommendation.as_ref() else {
        return Ok(None);
    };
    let resources = ResourceRequirements {
        requests: quantities(recommendation.requests.as_ref())?,
        limits: quantities(recommendation.limits.as_ref())?,
    };

    if resources.is_empty() {
        return Ok(None);
    }

    Ok(Some(ContainerPatch {
        name: container.name.clone(),
        resources,
    }))
}

/// Build the patch for a workload.
///
/// With a container filter only the first container of that name is
/// considered; a filter that matches nothing is an error. Returns
/// `Ok(None)` when no considered container carries a recommendation.
pub fn build_patch(
    workload: &WorkloadRecommendation,
    container_filter: Option<&str>,
) -> Result<Option<PatchDocument>> {
    let considered: Vec<&ContainerRecommendation> = match container_filter {
        Some(wanted) => {
            let container = workload
                .containers
                .iter()
                .find(|c| c.name == wanted)
                .ok_or_else(|| PatchError::ContainerNotFound {
                    container: wanted.to_string(),
                    workload: workload.name.clone(),
                })?;
            vec![container]
        }
        None => workload.containers.iter().collect(),
    };

    let containers: Vec<ContainerPatch> = considered
        .into_iter()
        .map(container_patch)
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .flatten()
        .collect();

    if containers.is_empty() {
        return Ok(None);
    }

    let kind = workload.kind.clone().ok_or_else(|| {
        PatchError::Schema(format!("workload '{}' has no 'kind' field", workload.name))
    })?;

    Ok(Some(PatchDocument {
        api_version: PATCH_API_VERSION.to_string(),
        kind,
        metadata: PatchMetadata {
            name: workload.name.clone(),
            namespace: workload.namespace.clone(),
        },
        spec: PatchSpec {
            template: PodTemplatePatch {
                spec: PodSpecPatch { containers },
            },
        },
    }))
}
