use serde::{Deserialize, Serialize};

use super::defaults;

/// Kubernetes API access for the node readiness provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// API server base URL.
    pub api_server_url: String,
    /// Bearer token file, re-read on every fetch.
    pub token_path: String,
    /// CA bundle used to verify the API server. Ignored if the file does not exist.
    pub ca_cert_path: String,
    /// `limit` per list request.
    pub page_size: u32,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            api_server_url: defaults::DEFAULT_API_SERVER_URL.to_string(),
            token_path: defaults::DEFAULT_TOKEN_PATH.to_string(),
            ca_cert_path: defaults::DEFAULT_CA_CERT_PATH.to_string(),
            page_size: defaults::DEFAULT_PAGE_SIZE,
        }
    }
}
