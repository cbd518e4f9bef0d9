/// Configuration errors. Fatal at startup, never raised at runtime.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be greater than zero")]
    NonPositive { field: &'static str },

    #[error("{field} = {value} exceeds the maximum of {max}")]
    OutOfRange {
        field: &'static str,
        value: u64,
        max: u64,
    },

    #[error("check interval {check_interval_secs}s exceeds alert threshold {alert_threshold_secs}s; debouncing would be defeated")]
    IntervalExceedsThreshold {
        check_interval_secs: u64,
        alert_threshold_secs: u64,
    },

    #[error("notification destination is empty while monitoring is enabled")]
    MissingDestination,

    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidOverride {
        key: String,
        value: String,
        reason: String,
    },

    #[error("failed to parse config: {reason}")]
    Parse { reason: String },

    #[error("failed to read config file {path}: {reason}")]
    Read { path: String, reason: String },
}
