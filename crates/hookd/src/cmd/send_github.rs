//! Send-github command - test a GitHub endpoint on a running daemon
//!
//! Signs a payload with the secret of a configured `github://` receiver
//! and POSTs it at the daemon the way GitHub would, headers included.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use hookd_config::Config;
use hookd_receivers::sign_payload;
use hookd_webhook::ComponentDescriptor;

/// Send-github command arguments
#[derive(Args, Debug)]
pub struct SendGithubArgs {
    /// Path to the daemon's configuration file
    #[arg(short, long, default_value = "hookd.toml")]
    pub config: PathBuf,

    /// Name of the configured github receiver to sign for
    #[arg(short, long)]
    pub receiver: String,

    /// Endpoint to POST to (e.g. /github-test)
    #[arg(short, long)]
    pub endpoint: String,

    /// GitHub event type to claim
    #[arg(long, default_value = "push")]
    pub event: String,

    /// Path to a file to send as the payload
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Payload words, concatenated when no file is given
    pub payload: Vec<String>,
}

/// Run the send-github command
pub async fn run(args: SendGithubArgs) -> Result<()> {
    let config = Config::from_file(&args.config).context("failed to load configuration")?;

    let descriptor = config
        .receiver_descriptor(&args.receiver)
        .with_context(|| format!("no receiver named '{}' in config", args.receiver))?;
    let descriptor = ComponentDescriptor::parse(descriptor)?;

    let secret = descriptor
        .param("secret")
        .with_context(|| format!("receiver '{}' has no 'secret' parameter", args.receiver))?;

    let body = match &args.file {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("failed to read payload file {}", path.display()))?,
        None => args.payload.join(" ").into_bytes(),
    };

    let signature = sign_payload(&secret, &body);

    let target = format!(
        "http://{}{}",
        config.daemon.bind_address(),
        args.endpoint
    );

    info!(target = %target, event = %args.event, bytes = body.len(), "sending signed event");

    let response = reqwest::Client::new()
        .post(&target)
        .header("X-GitHub-Event", args.event.as_str())
        .header("X-Hub-Signature-256", signature)
        .body(body)
        .send()
        .await
        .with_context(|| format!("POST {target} failed"))?;

    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if !status.is_success() {
        anyhow::bail!("daemon answered {status}: {}", body.trim_end());
    }

    info!(status = %status, response = %body.trim_end(), "event accepted");
    Ok(())
}
