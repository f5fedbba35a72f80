//! HTTP client for the workload autoscaling API

use crate::error::{PatchError, Result};
use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Public endpoint of the autoscaling service
pub const DEFAULT_API_URL: &str = "https://api.cast.ai";

/// Header carrying the static API key
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the service (e.g., "https://api.cast.ai")
    pub base_url: String,
    /// User agent sent with each request
    pub user_agent: String,
    /// Request timeout. `None` blocks until the server answers.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            user_agent: concat!("wrp/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: None,
        }
    }
}

/// Source of the raw workloads document for a cluster
#[async_trait]
pub trait WorkloadSource: Send + Sync {
    /// Fetch the decoded workloads body for the given cluster
    async fn fetch_workloads(&self, cluster_id: &str) -> Result<Value>;
}

/// API client for the workload autoscaling service
pub struct RecommendationClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl std::fmt::Debug for RecommendationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommendationClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl RecommendationClient {
    /// Create a new API client
    pub fn new(config: ClientConfig, api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(PatchError::InvalidInput("API key must not be empty".to_string()));
        }

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            PatchError::InvalidInput(format!("invalid API URL '{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(PatchError::InvalidInput(format!(
                "invalid API URL '{}': not a base URL",
                config.base_url
            )));
        }

        let mut builder = Client::builder().user_agent(config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Create a client against the public endpoint
    pub fn with_defaults(api_key: impl Into<String>) -> Result<Self> {
        Self::new(ClientConfig::default(), api_key)
    }

    /// Base URL requests are built from
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the workloads listing for a cluster
    pub fn workloads_url(&self, cluster_id: &str) -> Result<Url> {
        if cluster_id.is_empty() {
            return Err(PatchError::InvalidInput("cluster id must not be empty".to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PatchError::InvalidInput("API URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(["v1", "workload-autoscaling", "clusters", cluster_id, "workloads"]);
        Ok(url)
    }
}

#[async_trait]
impl WorkloadSource for RecommendationClient {
    async fn fetch_workloads(&self, cluster_id: &str) -> Result<Value> {
        let url = self.workloads_url(cluster_id)?;
        debug!(url = %url, "Requesting workload recommendations");

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(PatchError::Api {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(PatchError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client_for(server: &mockito::ServerGuard) -> RecommendationClient {
        let config = ClientConfig {
            base_url: server.url(),
            ..ClientConfig::default()
        };
        RecommendationClient::new(config, "secret-key").unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://api.cast.ai");
        assert!(config.timeout.is_none());
        assert!(config.user_agent.starts_with("wrp/"));
    }

    #[test]
    fn test_workloads_url() {
        let client = RecommendationClient::with_defaults("k").unwrap();
        let url = client.workloads_url("c-123").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.cast.ai/v1/workload-autoscaling/clusters/c-123/workloads"
        );
    }

    #[test]
    fn test_workloads_url_keeps_base_path_and_encodes_cluster_id() {
        let config = ClientConfig {
            base_url: "http://proxy.local/castai/".to_string(),
            ..ClientConfig::default()
        };
        let client = RecommendationClient::new(config, "k").unwrap();
        let url = client.workloads_url("a/b c").unwrap();
        assert_eq!(
            url.as_str(),
            "http://proxy.local/castai/v1/workload-autoscaling/clusters/a%2Fb%20c/workloads"
        );
    }

    #[test]
    fn test_empty_inputs_rejected() {
        assert!(matches!(
            RecommendationClient::with_defaults(""),
            Err(PatchError::InvalidInput(_))
        ));

        let client = RecommendationClient::with_defaults("k").unwrap();
        assert!(matches!(client.workloads_url(""), Err(PatchError::InvalidInput(_))));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = ClientConfig {
            base_url: "not a url".to_string(),
            ..ClientConfig::default()
        };
        assert!(matches!(
            RecommendationClient::new(config, "k"),
            Err(PatchError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = RecommendationClient::with_defaults("super-secret").unwrap();
        let rendered = format!("{:?}", client);
        assert!(!rendered.contains("super-secret"));
    }

    #[tokio::test]
    async fn test_fetch_sends_key_and_accept_headers() {
        let mut server = mockito::Server::new_async().await;
        let body = json!({"workloads": [{"name": "api", "namespace": "default"}]});
        let mock = server
            .mock("GET", "/v1/workload-autoscaling/clusters/c-1/workloads")
            .match_header("x-api-key", "secret-key")
            .match_header("accept", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let value = client_for(&server).fetch_workloads("c-1").await.unwrap();

        mock.assert_async().await;
        assert_eq!(value, body);
    }

    #[tokio::test]
    async fn test_fetch_non_json_body_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", Matcher::Any)
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let err = client_for(&server).fetch_workloads("c-1").await.unwrap_err();
        assert!(matches!(err, PatchError::Decode(_)));
    }

    #[tokio::test]
    async fn test_fetch_error_status_is_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", Matcher::Any)
            .with_status(401)
            .with_body(r#"{"message":"unauthorized"}"#)
            .create_async()
            .await;

        let err = client_for(&server).fetch_workloads("c-1").await.unwrap_err();
        match err {
            PatchError::Api { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("unauthorized"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_transport_error() {
        let config = ClientConfig {
            // Port 9 (discard) on loopback is not expected to be listening
            base_url: "http://127.0.0.1:9".to_string(),
            timeout: Some(Duration::from_secs(5)),
            ..ClientConfig::default()
        };
        let client = RecommendationClient::new(config, "k").unwrap();

        let err = client.fetch_workloads("c-1").await.unwrap_err();
        assert!(matches!(err, PatchError::Transport(_)));
    }
}
