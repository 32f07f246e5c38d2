//! Service and deployment records

use serde::{Deserialize, Serialize};

/// A long-running service maintaining a desired count of task instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub service_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub desired_count: i64,
    pub pending_count: i64,
    pub running_count: i64,
    /// ARN of the task-definition revision the service currently targets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_definition: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deployments: Vec<Deployment>,
}

/// Rollout progress for one task-definition revision within a service.
///
/// Created by the control plane when a service update is issued and refreshed
/// on every describe. The driver only ever reads these counts; all mutation
/// goes through the service-update operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// ARN of the task-definition revision this rollout targets.
    pub task_definition: String,
    pub desired_count: i64,
    pub pending_count: i64,
    pub running_count: i64,
}

impl Deployment {
    /// Whether the rollout has reached its desired running count.
    pub fn is_converged(&self) -> bool {
        self.running_count == self.desired_count
    }
}
