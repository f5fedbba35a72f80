//! Library for turning workload autoscaling recommendations into patches
//!
//! This crate provides:
//! - An HTTP client for the workload autoscaling API
//! - Lookup of a single workload by name and namespace
//! - Conversion of recommendations into a Kubernetes resource patch
//! - Structured logging for each pipeline stage

pub mod client;
pub mod error;
pub mod locator;
pub mod models;
pub mod observability;
pub mod patch;
pub mod pipeline;

pub use client::{ClientConfig, RecommendationClient, WorkloadSource};
pub use error::{PatchError, Result};
pub use models::*;
pub use observability::PipelineLogger;
pub use pipeline::{generate_patch, patch_from_response, render_patch, PatchRequest};
