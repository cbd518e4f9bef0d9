//! Configuration: TOML file sections with defaults, environment overrides, and startup validation.

mod cluster_config;
pub mod defaults;
mod monitor_config;
mod notify_config;
mod observability_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use cluster_config::ClusterConfig;
pub use monitor_config::MonitorConfig;
pub use notify_config::NotifyConfig;
pub use observability_config::ObservabilityConfig;

use crate::errors::ConfigError;

/// Environment variables recognised by [`NodeWatchConfig::apply_env_overrides`].
pub mod env_keys {
    pub const CHECK_INTERVAL_SECS: &str = "NODEWATCH_CHECK_INTERVAL_SECS";
    pub const ALERT_THRESHOLD_SECS: &str = "NODEWATCH_ALERT_THRESHOLD_SECS";
    pub const ENABLED: &str = "NODEWATCH_ENABLED";
    pub const LOG: &str = "NODEWATCH_LOG";
    pub const BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
    pub const CHAT_ID: &str = "TELEGRAM_CHAT_ID";
}

/// Top-level configuration for the nodewatch service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeWatchConfig {
    pub monitor: MonitorConfig,
    pub cluster: ClusterConfig,
    pub notify: NotifyConfig,
    pub observability: ObservabilityConfig,
}

impl NodeWatchConfig {
    /// Parse from a TOML string. Missing sections and fields fall back to defaults.
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })
    }

    /// Load from a TOML file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&raw)
    }

    /// Serialize the effective configuration back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })
    }

    /// Apply overrides from the process environment.
    pub fn apply_process_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup. Empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(env_keys::CHECK_INTERVAL_SECS) {
            self.monitor.check_interval_secs = parse_u64(env_keys::CHECK_INTERVAL_SECS, &v)?;
        }
        if let Some(v) = get(env_keys::ALERT_THRESHOLD_SECS) {
            self.monitor.alert_threshold_secs = parse_u64(env_keys::ALERT_THRESHOLD_SECS, &v)?;
        }
        if let Some(v) = get(env_keys::ENABLED) {
            self.monitor.enabled = parse_bool(env_keys::ENABLED, &v)?;
        }
        if let Some(v) = get(env_keys::LOG) {
            self.observability.log_level = v;
        }
        if let Some(v) = get(env_keys::BOT_TOKEN) {
            self.notify.bot_token = Some(v);
        }
        if let Some(v) = get(env_keys::CHAT_ID) {
            self.notify.destination = v;
        }
        Ok(())
    }

    /// Reject configurations that would break the poll loop or defeat debouncing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.monitor.validate()?;
        if self.cluster.page_size == 0 {
            return Err(ConfigError::NonPositive {
                field: "cluster.page_size",
            });
        }
        if self.monitor.enabled && self.notify.destination.trim().is_empty() {
            return Err(ConfigError::MissingDestination);
        }
        Ok(())
    }
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidOverride {
            key: key.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidOverride {
            key: key.to_string(),
            value: value.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}
