//! hookd - webhook receive/transform/dispatch daemon
//!
//! # Usage
//!
//! ```bash
//! # Run the daemon (default)
//! hookd
//! hookd --config configs/hookd.toml
//!
//! # Send a signed synthetic GitHub event at a configured endpoint
//! hookd send-github --receiver github --endpoint /github-test hello world
//! ```

mod cmd;
mod components;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// hookd - webhook receive/transform/dispatch daemon
#[derive(Parser, Debug)]
#[command(name = "hookd")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    // Serve args apply at the top level too, so a bare `hookd --config x`
    // runs the daemon
    #[command(flatten)]
    serve: cmd::serve::ServeArgs,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the webhook daemon
    Serve(cmd::serve::ServeArgs),

    /// Send a signed synthetic GitHub event to a running daemon
    SendGithub(cmd::send_github::SendGithubArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level)?;

    match cli.command {
        Some(Command::Serve(args)) => cmd::serve::run(args).await,
        Some(Command::SendGithub(args)) => cmd::send_github::run(args).await,
        // No subcommand = run the daemon (default behavior)
        None => cmd::serve::run(cli.serve).await,
    }
}

/// Initialize the tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();

    Ok(())
}
