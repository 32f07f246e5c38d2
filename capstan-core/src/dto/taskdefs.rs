//! Task-definition action payloads

use serde::{Deserialize, Serialize};

use crate::domain::taskdef::TaskDefinition;

/// Request for the `DescribeTaskDefinition` action.
///
/// A bare family name resolves to the newest active revision; the control
/// plane never requires an explicit revision number here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeTaskDefinitionRequest {
    pub task_definition: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeTaskDefinitionResponse {
    pub task_definition: TaskDefinition,
}

/// Response for the `RegisterTaskDefinition` action: the stored revision,
/// now carrying its control-plane-assigned ARN and revision number.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterTaskDefinitionResponse {
    pub task_definition: TaskDefinition,
}
