//! Shared reqwest client construction: request timeout, gzip, optional CA bundle.

use std::path::PathBuf;
use std::time::Duration;

/// Configuration for an outbound HTTP client.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL requests are resolved against. Trailing slashes are ignored.
    pub base_url: String,
    /// Whole-request timeout.
    pub timeout: Duration,
    /// PEM bundle added to the trust roots. Skipped when the file does not exist.
    pub ca_cert_path: Option<PathBuf>,
}

impl HttpClientConfig {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
            ca_cert_path: None,
        }
    }

    pub fn with_ca_cert(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_cert_path = Some(path.into());
        self
    }

    /// `base_url` joined with `path`, which must start with `/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Build the client. Errors are returned as plain strings for the caller
    /// to wrap in its own error type.
    pub fn build(&self) -> Result<reqwest::Client, String> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .gzip(true)
            .user_agent(concat!("nodewatch/", env!("CARGO_PKG_VERSION")));

        if let Some(path) = self.ca_cert_path.as_ref().filter(|p| p.is_file()) {
            let pem = std::fs::read(path)
                .map_err(|e| format!("reading CA bundle {}: {e}", path.display()))?;
            let cert = reqwest::Certificate::from_pem(&pem)
                .map_err(|e| format!("parsing CA bundle {}: {e}", path.display()))?;
            builder = builder.add_root_certificate(cert);
        }

        builder.build().map_err(|e| e.to_string())
    }
}
