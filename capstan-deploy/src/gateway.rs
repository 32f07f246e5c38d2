//! Control-plane gateway seam
//!
//! The deployment engine only ever talks to the control plane through this
//! narrow trait. [`ClusterClient`] is the production implementation; tests
//! substitute a scripted fake.

use async_trait::async_trait;
use capstan_client::{ClientError, ClusterClient};
use capstan_core::domain::service::Deployment;
use capstan_core::domain::task::Task;
use capstan_core::domain::taskdef::{TaskDefinition, TaskDefinitionSpec};

/// Remote operations the deployment engine consumes
#[async_trait]
pub trait OrchestrationGateway: Send + Sync {
    /// Fetches the newest active revision of a task-definition family.
    async fn describe_task_definition(&self, family: &str) -> Result<TaskDefinition, ClientError>;

    /// Registers a new revision and returns its assigned ARN.
    async fn register_task_definition(
        &self,
        spec: &TaskDefinitionSpec,
    ) -> Result<String, ClientError>;

    /// Points a service at a task-definition revision and/or adjusts its
    /// desired count. `None` for either leaves the current value untouched.
    async fn update_service(
        &self,
        cluster: &str,
        service: &str,
        desired_count: Option<i64>,
        task_definition: Option<&str>,
    ) -> Result<(), ClientError>;

    /// Lists the ARNs of all tasks currently associated with a cluster.
    async fn list_tasks(&self, cluster: &str) -> Result<Vec<String>, ClientError>;

    /// Describes tasks by ARN.
    async fn describe_tasks(
        &self,
        cluster: &str,
        task_arns: &[String],
    ) -> Result<Vec<Task>, ClientError>;

    /// Stops a single task. Irreversible.
    async fn stop_task(
        &self,
        cluster: &str,
        task_arn: &str,
        reason: Option<&str>,
    ) -> Result<(), ClientError>;

    /// Finds the deployment entry tracking `arn` within a service, if the
    /// control plane has one yet.
    async fn service_deployment(
        &self,
        cluster: &str,
        service: &str,
        arn: &str,
    ) -> Result<Option<Deployment>, ClientError>;
}

#[async_trait]
impl OrchestrationGateway for ClusterClient {
    async fn describe_task_definition(&self, family: &str) -> Result<TaskDefinition, ClientError> {
        ClusterClient::describe_task_definition(self, family).await
    }

    async fn register_task_definition(
        &self,
        spec: &TaskDefinitionSpec,
    ) -> Result<String, ClientError> {
        let registered = ClusterClient::register_task_definition(self, spec).await?;
        registered.task_definition_arn.ok_or_else(|| {
            ClientError::ParseError("registration response carried no taskDefinitionArn".to_string())
        })
    }

    async fn update_service(
        &self,
        cluster: &str,
        service: &str,
        desired_count: Option<i64>,
        task_definition: Option<&str>,
    ) -> Result<(), ClientError> {
        ClusterClient::update_service(self, cluster, service, desired_count, task_definition).await
    }

    async fn list_tasks(&self, cluster: &str) -> Result<Vec<String>, ClientError> {
        ClusterClient::list_tasks(self, cluster).await
    }

    async fn describe_tasks(
        &self,
        cluster: &str,
        task_arns: &[String],
    ) -> Result<Vec<Task>, ClientError> {
        ClusterClient::describe_tasks(self, cluster, task_arns).await
    }

    async fn stop_task(
        &self,
        cluster: &str,
        task_arn: &str,
        reason: Option<&str>,
    ) -> Result<(), ClientError> {
        ClusterClient::stop_task(self, cluster, task_arn, reason).await
    }

    async fn service_deployment(
        &self,
        cluster: &str,
        service: &str,
        arn: &str,
    ) -> Result<Option<Deployment>, ClientError> {
        ClusterClient::service_deployment(self, cluster, service, arn).await
    }
}
