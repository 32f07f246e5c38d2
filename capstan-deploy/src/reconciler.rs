//! Stale-task reconciliation
//!
//! After a service moves to a new revision, task instances launched from a
//! different task-definition family are stopped. Same-family tasks are left
//! alone: the control plane's own rolling update drains them.

use std::sync::Arc;
use tracing::{debug, info};

use capstan_core::domain::ident::TaskDefinitionId;

use crate::error::{DeployError, Stage};
use crate::gateway::OrchestrationGateway;

/// Stops task instances that no longer belong to the deployed family.
///
/// Stopping is irreversible and production-impacting, so reconciliation only
/// ever runs as an explicit pipeline step, never implicitly.
pub struct StaleTaskReconciler<G> {
    gateway: Arc<G>,
}

impl<G: OrchestrationGateway> StaleTaskReconciler<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Stops every task in `cluster` whose task-definition family differs
    /// from `new_family`; returns the number of tasks stopped.
    ///
    /// A task identifier that does not decompose aborts the reconciliation
    /// with [`DeployError::MalformedTaskDefinition`], as does the first stop
    /// failure. Tasks already stopped by then stay stopped; there is no
    /// compensation.
    pub async fn stop_stale_tasks(
        &self,
        cluster: &str,
        new_family: &str,
    ) -> Result<usize, DeployError> {
        let task_arns = self
            .gateway
            .list_tasks(cluster)
            .await
            .map_err(|e| DeployError::gateway(Stage::ListTasks, e))?;

        if task_arns.is_empty() {
            debug!("No tasks in cluster {}", cluster);
            return Ok(0);
        }

        let tasks = self
            .gateway
            .describe_tasks(cluster, &task_arns)
            .await
            .map_err(|e| DeployError::gateway(Stage::DescribeTasks, e))?;

        let mut stopped = 0;
        for task in &tasks {
            let id: TaskDefinitionId = task.task_definition_arn.parse().map_err(|source| {
                DeployError::MalformedTaskDefinition {
                    task_arn: task.task_arn.clone(),
                    source,
                }
            })?;

            if id.family == new_family {
                debug!(
                    task = %task.task_arn,
                    revision = id.revision,
                    "Task belongs to the deployed family; leaving it to the rolling update"
                );
                continue;
            }

            info!(task = %task.task_arn, family = %id.family, "Stopping stale task");

            let reason = format!("superseded by deployment of {}", new_family);
            self.gateway
                .stop_task(cluster, &task.task_arn, Some(&reason))
                .await
                .map_err(|e| DeployError::gateway(Stage::StopTask, e))?;
            stopped += 1;
        }

        Ok(stopped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{FakeGateway, task};

    fn reconciler(gateway: &Arc<FakeGateway>) -> StaleTaskReconciler<FakeGateway> {
        StaleTaskReconciler::new(Arc::clone(gateway))
    }

    #[tokio::test]
    async fn test_stops_only_tasks_of_other_families() {
        let gateway = Arc::new(FakeGateway::new());
        gateway.set_tasks(vec![
            task("task/a1", "app", 3),
            task("task/a2", "app", 2),
            task("task/b1", "other", 9),
        ]);

        let stopped = reconciler(&gateway)
            .stop_stale_tasks("default", "app")
            .await
            .unwrap();

        assert_eq!(stopped, 1);
        assert_eq!(
            gateway.stopped_tasks(),
            vec!["arn:aws:ecs:us-east-1:123456789012:task/b1".to_string()]
        );
    }

    #[tokio::test]
    async fn test_empty_cluster_is_a_no_op() {
        let gateway = Arc::new(FakeGateway::new());

        let stopped = reconciler(&gateway)
            .stop_stale_tasks("default", "app")
            .await
            .unwrap();

        assert_eq!(stopped, 0);
        // List only: an empty cluster never triggers a describe.
        assert_eq!(gateway.recorded().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_identifier_is_an_explicit_error() {
        let gateway = Arc::new(FakeGateway::new());
        let mut broken = task("task/a1", "app", 3);
        broken.task_definition_arn = "not-an-arn".to_string();
        gateway.set_tasks(vec![broken]);

        let err = reconciler(&gateway)
            .stop_stale_tasks("default", "app")
            .await
            .unwrap_err();

        assert!(matches!(err, DeployError::MalformedTaskDefinition { .. }));
        assert!(gateway.stopped_tasks().is_empty());
    }

    #[tokio::test]
    async fn test_stop_failure_aborts_reconciliation() {
        let gateway = Arc::new(FakeGateway::new());
        gateway.set_tasks(vec![task("task/b1", "other", 1)]);
        gateway.fail_stop_with("task already draining");

        let err = reconciler(&gateway)
            .stop_stale_tasks("default", "app")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DeployError::Gateway {
                stage: Stage::StopTask,
                ..
            }
        ));
    }
}
