use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Poll loop and alerting configuration.
///
/// `check_interval_secs` must stay well below `alert_threshold_secs` so that several
/// consecutive unhealthy polls are observed before an alert fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Run the poll loop at all.
    pub enabled: bool,
    /// Seconds between polls.
    pub check_interval_secs: u64,
    /// Seconds a node must be unhealthy before an alert fires.
    pub alert_threshold_secs: u64,
    /// Upper bound on one snapshot fetch.
    pub fetch_timeout_secs: u64,
    /// Upper bound on one notification delivery.
    pub notify_timeout_secs: u64,
    /// Drop entries missing for longer than this. Unset keeps them for the process lifetime.
    pub prune_missing_after_secs: Option<u64>,
    /// Send a one-off message when the loop starts.
    pub announce_startup: bool,
}

impl MonitorConfig {
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs)
    }

    /// Poll cadence as a wall-clock span, for message rendering.
    pub fn check_interval_delta(&self) -> chrono::Duration {
        secs_to_delta(self.check_interval_secs)
    }

    pub fn alert_threshold(&self) -> chrono::Duration {
        secs_to_delta(self.alert_threshold_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn notify_timeout(&self) -> Duration {
        Duration::from_secs(self.notify_timeout_secs)
    }

    /// Reject zero or oversized durations and a poll cadence slower than the alert threshold.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("monitor.check_interval_secs", Some(self.check_interval_secs)),
            ("monitor.alert_threshold_secs", Some(self.alert_threshold_secs)),
            ("monitor.fetch_timeout_secs", Some(self.fetch_timeout_secs)),
            ("monitor.notify_timeout_secs", Some(self.notify_timeout_secs)),
            ("monitor.prune_missing_after_secs", self.prune_missing_after_secs),
        ];
        for (field, value) in durations {
            match value {
                Some(0) => return Err(ConfigError::NonPositive { field }),
                Some(value) if value > defaults::MAX_DURATION_SECS => {
                    return Err(ConfigError::OutOfRange {
                        field,
                        value,
                        max: defaults::MAX_DURATION_SECS,
                    });
                }
                _ => {}
            }
        }
        if self.check_interval_secs > self.alert_threshold_secs {
            return Err(ConfigError::IntervalExceedsThreshold {
                check_interval_secs: self.check_interval_secs,
                alert_threshold_secs: self.alert_threshold_secs,
            });
        }
        Ok(())
    }

    pub fn prune_missing_after(&self) -> Option<chrono::Duration> {
        self.prune_missing_after_secs.map(secs_to_delta)
    }
}

/// Saturating conversion; out-of-range values are rejected by `validate` before use.
fn secs_to_delta(secs: u64) -> chrono::Duration {
    i64::try_from(secs)
        .ok()
        .and_then(chrono::Duration::try_seconds)
        .unwrap_or(chrono::Duration::MAX)
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::DEFAULT_MONITOR_ENABLED,
            check_interval_secs: defaults::DEFAULT_CHECK_INTERVAL_SECS,
            alert_threshold_secs: defaults::DEFAULT_ALERT_THRESHOLD_SECS,
            fetch_timeout_secs: defaults::DEFAULT_FETCH_TIMEOUT_SECS,
            notify_timeout_secs: defaults::DEFAULT_NOTIFY_TIMEOUT_SECS,
            prune_missing_after_secs: None,
            announce_startup: defaults::DEFAULT_ANNOUNCE_STARTUP,
        }
    }
}
