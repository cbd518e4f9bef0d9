//! # nodewatch
//!
//! Watches Kubernetes node readiness and sends one alert per incident.
//!
//! ## Commands
//! - `run`: poll until ctrl-c
//! - `check-config`: validate and print the effective configuration
//! - `once`: fetch a single readiness snapshot and print it as JSON
//!
//! ## Environment Variables
//! - `NODEWATCH_CONFIG`: config file path (same as `--config`)
//! - `NODEWATCH_CHECK_INTERVAL_SECS`, `NODEWATCH_ALERT_THRESHOLD_SECS`, `NODEWATCH_ENABLED`
//! - `TELEGRAM_BOT_TOKEN`, `TELEGRAM_CHAT_ID`
//! - `NODEWATCH_LOG`: tracing filter

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use nodewatch_monitor::tracing_setup::init_tracing;

#[derive(Parser)]
#[command(version, about = "Kubernetes node health monitor")]
struct Cli {
    /// TOML config file. Defaults apply when omitted.
    #[arg(short, long, global = true, env = "NODEWATCH_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the monitor until interrupted.
    Run,
    /// Validate the configuration and print it with secrets masked.
    CheckConfig,
    /// Fetch one readiness snapshot and print it.
    Once,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = nodewatch_cli::load_config(cli.config.as_deref(), |key| std::env::var(key).ok())?;

    match cli.cmd {
        Commands::CheckConfig => {
            config.validate()?;
            print!("{}", nodewatch_cli::redacted_toml(&config)?);
        }
        Commands::Once => {
            init_tracing(&config.observability).map_err(|e| anyhow!(e))?;
            let snapshot = nodewatch_cli::snapshot_once(&config)
                .await
                .context("fetching node readiness")?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Commands::Run => {
            config.validate()?;
            init_tracing(&config.observability).map_err(|e| anyhow!(e))?;
            nodewatch_cli::run(config).await.context("running monitor")?;
        }
    }
    Ok(())
}
