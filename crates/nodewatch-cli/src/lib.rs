//! Config loading and collaborator wiring shared by the `nodewatch` subcommands.

use std::path::Path;

use anyhow::{Context, Result};
use nodewatch_core::config::NodeWatchConfig;
use nodewatch_core::models::Snapshot;
use nodewatch_core::traits::{IClusterStateProvider, INotificationSink};
use nodewatch_core::NodeWatchResult;
use nodewatch_monitor::{CancellationToken, Monitor};
use nodewatch_transport::{KubeNodeProvider, LogSink, TelegramSink};
use tracing::{info, warn};

/// Load the file (if given), then apply environment overrides via `lookup`.
/// Does not validate.
pub fn load_config<F>(path: Option<&Path>, lookup: F) -> Result<NodeWatchConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => NodeWatchConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => NodeWatchConfig::default(),
    };
    config
        .apply_env_overrides(lookup)
        .context("applying environment overrides")?;
    Ok(config)
}

/// Effective configuration as TOML with the bot token masked.
pub fn redacted_toml(config: &NodeWatchConfig) -> Result<String> {
    let mut shown = config.clone();
    if shown.notify.bot_token.is_some() {
        shown.notify.bot_token = Some("<redacted>".to_string());
    }
    Ok(shown.to_toml()?)
}

pub fn build_provider(config: &NodeWatchConfig) -> NodeWatchResult<KubeNodeProvider> {
    Ok(KubeNodeProvider::from_config(
        &config.cluster,
        config.monitor.fetch_timeout(),
    )?)
}

/// One fetch through the configured provider, outside the poll loop.
pub async fn snapshot_once(config: &NodeWatchConfig) -> NodeWatchResult<Snapshot> {
    let provider = build_provider(config)?;
    Ok(provider.list_node_readiness().await?)
}

/// Run the monitor until ctrl-c. Falls back to logging alerts when no bot token is set.
pub async fn run(config: NodeWatchConfig) -> NodeWatchResult<()> {
    let provider = build_provider(&config)?;
    match TelegramSink::from_config(&config.notify, config.monitor.notify_timeout()) {
        Some(sink) => run_with(config, provider, sink?).await,
        None => {
            warn!("no bot token configured; alerts will only be logged");
            run_with(config, provider, LogSink).await
        }
    }
}

async fn run_with<S: INotificationSink>(
    config: NodeWatchConfig,
    provider: KubeNodeProvider,
    sink: S,
) -> NodeWatchResult<()> {
    let mut monitor = Monitor::new(config.monitor, config.notify.destination, provider, sink)?;

    let shutdown = CancellationToken::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("nodewatch: shutdown requested");
            trigger.cancel();
        }
    });

    monitor.run(shutdown).await;
    Ok(())
}
