//! Deploy command handler
//!
//! Runs a full rolling deployment and blocks until the service converges,
//! ctrl-c is pressed, or the optional timeout elapses.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use capstan_client::ClusterClient;
use capstan_deploy::{DeployConfig, DeploymentDriver, Rollout};

use crate::config::Config;

/// Arguments for the deploy command
#[derive(Args)]
pub struct DeployArgs {
    /// Cluster to deploy into
    #[arg(long)]
    cluster: String,

    /// Service to roll onto the new revision
    #[arg(long)]
    service: String,

    /// Task-definition family to derive the new revision from
    #[arg(long)]
    family: String,

    /// Image repository to retag (matched as a prefix of container images)
    #[arg(long)]
    image: String,

    /// New image tag
    #[arg(long)]
    tag: String,

    /// New desired count (omit to keep the service's current count)
    #[arg(long)]
    count: Option<i64>,

    /// Give up after this many seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Seconds between rollout status polls
    #[arg(long, default_value_t = 5)]
    poll_interval: u64,
}

/// Run a rolling deployment
pub async fn run(args: DeployArgs, config: &Config) -> Result<()> {
    let deploy_config = DeployConfig::new(&config.endpoint)
        .with_poll_interval(Duration::from_secs(args.poll_interval));
    deploy_config
        .validate()
        .context("Invalid deployment configuration")?;

    let client = Arc::new(ClusterClient::new(&deploy_config.endpoint));
    let driver = DeploymentDriver::new(client, deploy_config);

    let cancel = CancellationToken::new();
    watch_for_ctrl_c(cancel.clone());
    if let Some(seconds) = args.timeout {
        cancel_after(cancel.clone(), Duration::from_secs(seconds));
    }

    let rollout = Rollout {
        cluster: args.cluster,
        service: args.service,
        family: args.family,
        image: args.image,
        tag: args.tag,
        desired_count: args.count,
    };

    println!(
        "{}",
        format!(
            "Deploying {}:{} to {}/{}...",
            rollout.image, rollout.tag, rollout.cluster, rollout.service
        )
        .bold()
    );

    match driver.deploy(&rollout, cancel).await {
        Ok(arn) => {
            println!("{}", "Deployment converged.".green().bold());
            println!("  task definition: {}", arn);
            Ok(())
        }
        Err(err) if err.is_cancelled() => {
            println!(
                "{}",
                "Deployment cancelled before convergence; the rollout may still complete on its own."
                    .yellow()
                    .bold()
            );
            Err(err.into())
        }
        Err(err) => Err(err).context("Deployment failed"),
    }
}

/// Cancels the deployment wait when the user presses ctrl-c
fn watch_for_ctrl_c(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Ctrl-C received; cancelling the convergence wait");
            cancel.cancel();
        }
    });
}

/// Cancels the deployment wait after a fixed duration
fn cancel_after(cancel: CancellationToken, duration: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(duration).await;
        cancel.cancel();
    });
}
