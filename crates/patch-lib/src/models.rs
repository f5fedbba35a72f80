//! Core data models: the API's recommendation records and the emitted patch

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// API version written into every patch document
pub const PATCH_API_VERSION: &str = "apps/v1";

/// Response body of the workloads endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadList {
    pub workloads: Vec<WorkloadRecommendation>,
}

/// A workload as reported by the autoscaling service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadRecommendation {
    pub name: String,
    pub namespace: String,
    /// Resource kind, e.g. `Deployment`
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub containers: Vec<ContainerRecommendation>,
}

/// Per-container entry of a workload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerRecommendation {
    pub name: String,
    #[serde(default)]
    pub recommendation: Option<Recommendation>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default)]
    pub requests: Option<ResourceAmounts>,
    #[serde(default)]
    pub limits: Option<ResourceAmounts>,
}

/// Recommended amounts in the service's units
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceAmounts {
    /// CPU in cores. Kept as the raw JSON number so its text survives.
    #[serde(default)]
    pub cpu_cores: Option<Number>,
    /// Memory in GiB
    #[serde(default)]
    pub memory_gib: Option<f64>,
}

/// Partial workload manifest carrying the updated container resources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchDocument {
    pub api_version: String,
    pub kind: String,
    pub metadata: PatchMetadata,
    pub spec: PatchSpec,
}

impl PatchDocument {
    /// Containers carried by the patch, in workload order
    pub fn containers(&self) -> &[ContainerPatch] {
        &self.spec.template.spec.containers
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchMetadata {
    pub name: String,
    pub namespace: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchSpec {
    pub template: PodTemplatePatch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodTemplatePatch {
    pub spec: PodSpecPatch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodSpecPatch {
    pub containers: Vec<ContainerPatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerPatch {
    pub name: String,
    pub resources: ResourceRequirements,
}

/// Kubernetes-style `resources` block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceRequirements {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requests: Option<ResourceQuantities>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits: Option<ResourceQuantities>,
}

impl ResourceRequirements {
    pub fn is_empty(&self) -> bool {
        self.requests.is_none() && self.limits.is_none()
    }
}

/// Quantities in Kubernetes notation (`"0.25"`, `"512Mi"`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceQuantities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,
}

impl ResourceQuantities {
    pub fn is_empty(&self) -> bool {
        self.cpu.is_none() && self.memory.is_none()
    }
}
