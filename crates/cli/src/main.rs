//! Workload Recommendation Patcher CLI
//!
//! Fetches autoscaling recommendations for a cluster, picks one workload
//! and prints a Kubernetes patch with the recommended container resources.

mod config;
mod output;

use anyhow::Result;
use clap::{builder::NonEmptyStringValueParser, Parser};
use output::OutputTarget;
use patch_lib::{
    client::DEFAULT_API_URL, generate_patch, locator::DEFAULT_NAMESPACE, render_patch,
    ClientConfig, PatchRequest, RecommendationClient,
};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Generate a Kubernetes patch from workload autoscaling recommendations
#[derive(Parser, Debug)]
#[command(name = "wrp")]
#[command(
    author,
    version,
    about = "Generate Kubernetes patch from workload autoscaling recommendations",
    long_about = None
)]
pub struct Cli {
    /// Cluster ID
    #[arg(long, env = "CASTAI_CLUSTER_ID", value_parser = NonEmptyStringValueParser::new())]
    pub cluster_id: String,

    /// API key
    #[arg(
        long,
        env = "CASTAI_API_KEY",
        hide_env_values = true,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub api_key: String,

    /// Name of the workload to find
    #[arg(long)]
    pub name: String,

    /// Namespace of the workload [default: default]
    #[arg(long)]
    pub namespace: Option<String>,

    /// Specific container to update (optional)
    #[arg(long)]
    pub container: Option<String>,

    /// Output file to write the patch (default: stdout)
    #[arg(long)]
    pub output_file: Option<PathBuf>,

    /// Pretty print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// API endpoint URL [default: https://api.cast.ai]
    #[arg(long, env = "CASTAI_API_URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds (waits indefinitely if not set)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Path to config file (default: ~/.config/wrp/config.json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,
}

fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout is reserved for the patch itself
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_ansi(std::io::stderr().is_terminal())
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => config::Config::load_from(path)?,
        None => config::Config::load()?,
    };
    debug!(?config, "Configuration loaded");

    let namespace = cli
        .namespace
        .or(config.default_namespace)
        .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
    let base_url = cli
        .api_url
        .or(config.api_url)
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    let client_config = ClientConfig {
        base_url,
        timeout: cli.timeout_secs.map(Duration::from_secs),
        ..ClientConfig::default()
    };
    let client = RecommendationClient::new(client_config, cli.api_key)?;

    let request = PatchRequest::new(cli.cluster_id, cli.name)
        .namespace(namespace)
        .container(cli.container);
    info!(
        cluster_id = %request.cluster_id,
        workload = %request.name,
        namespace = %request.namespace,
        "Generating patch"
    );

    let patch = generate_patch(&client, &request).await?;
    let rendered = render_patch(&patch, cli.pretty || config.pretty)?;

    output::write_patch(&rendered, &OutputTarget::from_option(cli.output_file.as_deref()))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
