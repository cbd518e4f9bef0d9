//! Tracing setup: subscriber initialization, span definitions, and structured events.

pub mod events;
pub mod spans;

use nodewatch_core::config::env_keys;
use nodewatch_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Error returned when a global subscriber is already installed.
pub type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Initialize the global tracing subscriber.
///
/// Respects the `NODEWATCH_LOG` environment variable for filtering and falls back
/// to the configured level.
pub fn init_tracing(config: &ObservabilityConfig) -> Result<(), InitError> {
    let filter = EnvFilter::try_from_env(env_keys::LOG)
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if config.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
    }
}
