//! Running-task records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A task instance currently known to the cluster.
///
/// Ephemeral: exists only while the control plane reports it as running or
/// pending. Stale-task reconciliation ends the lifecycle of instances whose
/// owning family was superseded by a deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub task_arn: String,
    /// ARN of the task-definition revision this task was launched from.
    pub task_definition_arn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
}
