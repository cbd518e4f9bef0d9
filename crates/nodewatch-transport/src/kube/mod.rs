//! Node readiness from the Kubernetes core API.

mod node_list;

use std::collections::HashSet;
use std::path::PathBuf;

use nodewatch_core::config::ClusterConfig;
use nodewatch_core::errors::SnapshotError;
use nodewatch_core::models::Snapshot;
use nodewatch_core::traits::IClusterStateProvider;
use tracing::debug;

pub use node_list::{
    readiness_from_node_list, ListMeta, Node, NodeCondition, NodeList, NodeStatus, ObjectMeta,
};

use crate::http_client::HttpClientConfig;

/// Hard stop for one listing, regardless of what the server returns.
pub const MAX_PAGES: usize = 1000;

/// Lists `/api/v1/nodes` page by page and reduces it to a readiness snapshot.
///
/// The service-account token is read from disk on every fetch so a rotated
/// token is picked up without a restart.
#[derive(Debug)]
pub struct KubeNodeProvider {
    http: HttpClientConfig,
    client: reqwest::Client,
    token_path: PathBuf,
    page_size: u32,
}

impl KubeNodeProvider {
    pub fn new(http: HttpClientConfig, token_path: impl Into<PathBuf>, page_size: u32) -> Result<Self, SnapshotError> {
        let client = http
            .build()
            .map_err(|reason| SnapshotError::Unavailable { reason })?;
        Ok(Self {
            http,
            client,
            token_path: token_path.into(),
            page_size: page_size.max(1),
        })
    }

    /// Build from the `[cluster]` section, with `timeout` as the per-request bound.
    pub fn from_config(config: &ClusterConfig, timeout: std::time::Duration) -> Result<Self, SnapshotError> {
        let http = HttpClientConfig::new(&config.api_server_url, timeout).with_ca_cert(&config.ca_cert_path);
        Self::new(http, &config.token_path, config.page_size)
    }

    async fn read_token(&self) -> Result<String, SnapshotError> {
        let raw = tokio::fs::read_to_string(&self.token_path)
            .await
            .map_err(|e| SnapshotError::Credentials {
                reason: format!("{}: {e}", self.token_path.display()),
            })?;
        let token = raw.trim();
        if token.is_empty() {
            return Err(SnapshotError::Credentials {
                reason: format!("{}: token file is empty", self.token_path.display()),
            });
        }
        Ok(token.to_string())
    }

    async fn fetch_page(&self, token: &str, continue_token: Option<&str>) -> Result<NodeList, SnapshotError> {
        let mut query: Vec<(&str, String)> = vec![("limit", self.page_size.to_string())];
        if let Some(c) = continue_token {
            query.push(("continue", c.to_string()));
        }

        let response = self
            .client
            .get(self.http.url("/api/v1/nodes"))
            .query(&query)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| SnapshotError::Unavailable { reason: e.to_string() })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SnapshotError::BadStatus {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SnapshotError::Unavailable { reason: e.to_string() })?;
        serde_json::from_slice(&bytes).map_err(|e| SnapshotError::InvalidResponse {
            reason: format!("NodeList decode failed: {e}"),
        })
    }
}

impl IClusterStateProvider for KubeNodeProvider {
    async fn list_node_readiness(&self) -> Result<Snapshot, SnapshotError> {
        let token = self.read_token().await?;
        let mut snapshot = Snapshot::new();
        let mut continue_token: Option<String> = None;
        let mut seen_tokens = HashSet::new();
        let mut pages = 0usize;

        loop {
            if pages == MAX_PAGES {
                return Err(SnapshotError::InvalidResponse {
                    reason: format!("node list exceeded {MAX_PAGES} pages"),
                });
            }
            let page = self.fetch_page(&token, continue_token.as_deref()).await?;
            pages += 1;
            page.extend_snapshot(&mut snapshot);
            let Some(next) = page.continue_token() else {
                break;
            };
            if !seen_tokens.insert(next.to_string()) {
                return Err(SnapshotError::InvalidResponse {
                    reason: "node list returned a repeated continue token".to_string(),
                });
            }
            continue_token = Some(next.to_string());
        }

        debug!(pages, nodes = snapshot.len(), "kube: node list fetched");
        Ok(snapshot)
    }

    fn name(&self) -> &str {
        "kubernetes"
    }
}
