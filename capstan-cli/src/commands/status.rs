//! Status command handler
//!
//! Shows rollout progress for every deployment a service is tracking.

use anyhow::{Context, Result};
use colored::*;

use capstan_client::ClusterClient;

use crate::config::Config;

/// Show rollout progress for a service
pub async fn run(cluster: &str, service: &str, config: &Config) -> Result<()> {
    let client = ClusterClient::new(&config.endpoint);

    let found = client
        .describe_service(cluster, service)
        .await
        .context("Failed to describe service")?;

    let Some(service) = found else {
        println!(
            "{}",
            format!("Service {} not found in cluster {}.", service, cluster).yellow()
        );
        return Ok(());
    };

    println!(
        "{}",
        format!(
            "{} — desired: {}, pending: {}, running: {}",
            service.service_name,
            service.desired_count,
            service.pending_count,
            service.running_count
        )
        .bold()
    );

    if service.deployments.is_empty() {
        println!("{}", "No deployments tracked.".yellow());
        return Ok(());
    }

    println!();
    for deployment in &service.deployments {
        let state = if deployment.is_converged() {
            "converged".green()
        } else {
            "rolling".yellow()
        };
        println!("  {} [{}]", deployment.task_definition, state);
        println!(
            "    desired: {}, pending: {}, running: {}",
            deployment.desired_count, deployment.pending_count, deployment.running_count
        );
    }

    Ok(())
}
