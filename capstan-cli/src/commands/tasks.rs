//! Tasks command handler
//!
//! Lists the tasks running in a cluster with their owning family and revision.

use anyhow::{Context, Result};
use colored::*;

use capstan_client::ClusterClient;
use capstan_core::domain::ident::TaskDefinitionId;

use crate::config::Config;

/// List tasks running in a cluster
pub async fn run(cluster: &str, config: &Config) -> Result<()> {
    let client = ClusterClient::new(&config.endpoint);

    let task_arns = client
        .list_tasks(cluster)
        .await
        .context("Failed to list tasks")?;

    if task_arns.is_empty() {
        println!("{}", "No tasks found.".yellow());
        return Ok(());
    }

    let tasks = client
        .describe_tasks(cluster, &task_arns)
        .await
        .context("Failed to describe tasks")?;

    println!("{}", format!("Found {} task(s):", tasks.len()).bold());
    println!();
    for task in tasks {
        let id: TaskDefinitionId = task
            .task_definition_arn
            .parse()
            .with_context(|| format!("Malformed task-definition identifier on {}", task.task_arn))?;

        let status = task.last_status.unwrap_or_else(|| "UNKNOWN".to_string());
        let status = match status.as_str() {
            "RUNNING" => status.green(),
            "PENDING" => status.yellow(),
            _ => status.normal(),
        };

        println!("  {} [{}]", id.to_string().bold(), status);
        println!("    {}", task.task_arn);
        if let Some(started_at) = task.started_at {
            println!("    started: {}", started_at.to_rfc3339().dimmed());
        }
    }

    Ok(())
}
