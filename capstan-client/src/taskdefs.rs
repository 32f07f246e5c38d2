//! Task-definition actions

use crate::ClusterClient;
use crate::error::Result;
use capstan_core::domain::taskdef::{TaskDefinition, TaskDefinitionSpec};
use capstan_core::dto::taskdefs::{
    DescribeTaskDefinitionRequest, DescribeTaskDefinitionResponse, RegisterTaskDefinitionResponse,
};

impl ClusterClient {
    /// Fetch the newest active revision of a task-definition family
    ///
    /// # Arguments
    /// * `family` - The task-definition family name
    ///
    /// # Returns
    /// The latest revision's full snapshot, including its ARN
    pub async fn describe_task_definition(&self, family: &str) -> Result<TaskDefinition> {
        let response = self
            .post_action(
                "DescribeTaskDefinition",
                &DescribeTaskDefinitionRequest {
                    task_definition: family.to_string(),
                },
            )
            .await?;

        let body: DescribeTaskDefinitionResponse = self.handle_response(response).await?;
        Ok(body.task_definition)
    }

    /// Register a new task-definition revision
    ///
    /// The control plane stores the spec as a full replacement under the
    /// spec's family and assigns the next revision number.
    ///
    /// # Arguments
    /// * `spec` - The registration payload
    ///
    /// # Returns
    /// The stored revision, carrying its assigned ARN and revision number
    pub async fn register_task_definition(
        &self,
        spec: &TaskDefinitionSpec,
    ) -> Result<TaskDefinition> {
        let response = self.post_action("RegisterTaskDefinition", spec).await?;

        let body: RegisterTaskDefinitionResponse = self.handle_response(response).await?;
        Ok(body.task_definition)
    }
}
