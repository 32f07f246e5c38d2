//! Capstan CLI
//!
//! Command-line interface for driving rolling deployments against the
//! container-orchestration control plane.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "capstan")]
#[command(about = "Rolling deployments for the cluster control plane", long_about = None)]
struct Cli {
    /// Control-plane URL
    #[arg(
        long,
        env = "CAPSTAN_ENDPOINT",
        default_value = "http://localhost:9400"
    )]
    endpoint: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "capstan=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config {
        endpoint: cli.endpoint,
    };

    handle_command(cli.command, &config).await
}
