//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod deploy;
mod status;
mod tasks;

pub use deploy::DeployArgs;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Roll a service onto a new image tag
    Deploy(DeployArgs),
    /// Show rollout progress for a service
    Status {
        /// Cluster the service runs in
        #[arg(long)]
        cluster: String,

        /// Service name
        #[arg(long)]
        service: String,
    },
    /// List tasks running in a cluster
    Tasks {
        /// Cluster to inspect
        #[arg(long)]
        cluster: String,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Deploy(args) => deploy::run(args, config).await,
        Commands::Status { cluster, service } => status::run(&cluster, &service, config).await,
        Commands::Tasks { cluster } => tasks::run(&cluster, config).await,
    }
}
