//! Error taxonomy for the recommendation-to-patch pipeline

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PatchError>;

/// Every way a run can fail. All variants are terminal; nothing is retried.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("Error fetching data from the workload autoscaling API")]
    Transport(#[from] reqwest::Error),

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Error decoding JSON response from API")]
    Decode(#[source] serde_json::Error),

    #[error("Unexpected API response format: {0}")]
    Schema(String),

    #[error("Workload '{name}' not found in namespace '{namespace}'")]
    NotFound { name: String, namespace: String },

    #[error("Container '{container}' not found in workload '{workload}'")]
    ContainerNotFound { container: String, workload: String },

    #[error("No recommendations found for workload '{0}'")]
    EmptyPatch(String),

    #[error("failed to serialize patch")]
    Serialize(#[source] serde_json::Error),
}
