//! Service actions

use crate::ClusterClient;
use crate::error::Result;
use capstan_core::domain::service::{Deployment, Service};
use capstan_core::dto::services::{
    DescribeServicesRequest, DescribeServicesResponse, UpdateServiceRequest,
};

impl ClusterClient {
    /// Point a service at a task-definition revision and/or adjust its
    /// desired count
    ///
    /// # Arguments
    /// * `cluster` - The cluster the service runs in
    /// * `service` - The service name
    /// * `desired_count` - New desired count; `None` leaves the current count untouched
    /// * `task_definition` - ARN of the revision to roll onto; `None` keeps the current one
    pub async fn update_service(
        &self,
        cluster: &str,
        service: &str,
        desired_count: Option<i64>,
        task_definition: Option<&str>,
    ) -> Result<()> {
        let response = self
            .post_action(
                "UpdateService",
                &UpdateServiceRequest {
                    cluster: cluster.to_string(),
                    service: service.to_string(),
                    desired_count,
                    task_definition: task_definition.map(str::to_string),
                },
            )
            .await?;

        self.handle_empty_response(response).await
    }

    /// Describe a single service
    ///
    /// # Returns
    /// The service record, or `None` if the cluster does not know the name
    pub async fn describe_service(&self, cluster: &str, service: &str) -> Result<Option<Service>> {
        let response = self
            .post_action(
                "DescribeServices",
                &DescribeServicesRequest {
                    cluster: cluster.to_string(),
                    services: vec![service.to_string()],
                },
            )
            .await?;

        let body: DescribeServicesResponse = self.handle_response(response).await?;
        Ok(body.services.into_iter().next())
    }

    /// Find the deployment entry tracking `arn` within a service
    ///
    /// Returns `None` when the control plane is not tracking a rollout for
    /// that revision yet; right after a service update this is ordinary
    /// propagation lag, not an error.
    pub async fn service_deployment(
        &self,
        cluster: &str,
        service: &str,
        arn: &str,
    ) -> Result<Option<Deployment>> {
        let service = self.describe_service(cluster, service).await?;

        Ok(service
            .map(|service| service.deployments)
            .unwrap_or_default()
            .into_iter()
            .find(|deployment| deployment.task_definition == arn))
    }
}
