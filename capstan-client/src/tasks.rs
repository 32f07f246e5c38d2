//! Task actions

use crate::ClusterClient;
use crate::error::Result;
use capstan_core::domain::task::Task;
use capstan_core::dto::tasks::{
    DescribeTasksRequest, DescribeTasksResponse, ListTasksRequest, ListTasksResponse,
    StopTaskRequest,
};

impl ClusterClient {
    /// List the ARNs of all tasks currently associated with a cluster
    pub async fn list_tasks(&self, cluster: &str) -> Result<Vec<String>> {
        let response = self
            .post_action(
                "ListTasks",
                &ListTasksRequest {
                    cluster: cluster.to_string(),
                },
            )
            .await?;

        let body: ListTasksResponse = self.handle_response(response).await?;
        Ok(body.task_arns)
    }

    /// Describe tasks by ARN
    ///
    /// Each returned record includes the ARN of the task-definition revision
    /// the task was launched from.
    pub async fn describe_tasks(&self, cluster: &str, task_arns: &[String]) -> Result<Vec<Task>> {
        let response = self
            .post_action(
                "DescribeTasks",
                &DescribeTasksRequest {
                    cluster: cluster.to_string(),
                    tasks: task_arns.to_vec(),
                },
            )
            .await?;

        let body: DescribeTasksResponse = self.handle_response(response).await?;
        Ok(body.tasks)
    }

    /// Stop a single task
    ///
    /// Irreversible: the control plane tears the instance down. The optional
    /// reason is recorded on the stopped task.
    pub async fn stop_task(&self, cluster: &str, task_arn: &str, reason: Option<&str>) -> Result<()> {
        let response = self
            .post_action(
                "StopTask",
                &StopTaskRequest {
                    cluster: cluster.to_string(),
                    task: task_arn.to_string(),
                    reason: reason.map(str::to_string),
                },
            )
            .await?;

        self.handle_empty_response(response).await
    }
}
