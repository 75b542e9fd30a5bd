//! Serve command - run the webhook daemon

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::info;

use hookd_config::Config;
use hookd_pipeline::PipelineTable;
use hookd_server::WebhookServer;

use crate::components::default_registry;

/// Config paths tried when none is given on the command line
const DEFAULT_CONFIG_PATHS: &[&str] = &["hookd.toml", "configs/hookd.toml"];

/// Serve command arguments
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        platform = std::env::consts::OS,
        arch = std::env::consts::ARCH,
        "hookd starting"
    );

    let config = load_config(args.config)?;

    let registry = default_registry().context("failed to register built-in components")?;

    let table =
        PipelineTable::from_config(&config, &registry).context("failed to build webhook table")?;

    info!(webhooks = table.len(), "webhook table built");

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            signal_cancel.cancel();
        }
    });

    let server = WebhookServer::new(config.daemon.clone(), Arc::new(table));
    server.run(cancel).await?;

    info!("hookd shutdown complete");
    Ok(())
}

/// Load configuration from the given path or the default locations
fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => {
            // User explicitly provided a config path - it must exist
            if !path.exists() {
                anyhow::bail!("config file not found: {}", path.display());
            }
            Config::from_file(&path).context("failed to load configuration")
        }
        None => {
            for candidate in DEFAULT_CONFIG_PATHS {
                let candidate = PathBuf::from(candidate);
                if candidate.exists() {
                    info!(config = %candidate.display(), "using config file");
                    return Config::from_file(&candidate).context("failed to load configuration");
                }
            }
            anyhow::bail!(
                "no config file found (tried {}); pass one with --config",
                DEFAULT_CONFIG_PATHS.join(", ")
            )
        }
    }
}
