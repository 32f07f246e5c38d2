//! Deployment driver
//!
//! Runs the rollout pipeline end to end: fetch the current task definition,
//! retag its image, register the new revision, point the service at it, stop
//! stale tasks, and wait for convergence.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::DeployConfig;
use crate::error::{DeployError, Stage};
use crate::gateway::OrchestrationGateway;
use crate::poller::ConvergencePoller;
use crate::reconciler::StaleTaskReconciler;

/// Parameters for one rolling deployment.
#[derive(Debug, Clone)]
pub struct Rollout {
    pub cluster: String,
    pub service: String,
    /// Task-definition family to derive the new revision from
    pub family: String,
    /// Image repository to retag, matched as a prefix of container images
    pub image: String,
    pub tag: String,
    /// New desired count; `None` leaves the service's current count untouched
    pub desired_count: Option<i64>,
}

/// Orchestrates a rolling deployment.
///
/// Stage effects are durable as they happen: a failure leaves earlier stages'
/// results in place (a registered revision with no service pointing at it is a
/// harmless inactive artifact). The driver does not serialize concurrent
/// deployments of the same (cluster, service) pair; callers must not overlap
/// them.
pub struct DeploymentDriver<G> {
    gateway: Arc<G>,
    poller: ConvergencePoller<G>,
    reconciler: StaleTaskReconciler<G>,
}

impl<G: OrchestrationGateway> DeploymentDriver<G> {
    pub fn new(gateway: Arc<G>, config: DeployConfig) -> Self {
        Self {
            poller: ConvergencePoller::new(Arc::clone(&gateway), config.poll_interval),
            reconciler: StaleTaskReconciler::new(Arc::clone(&gateway)),
            gateway,
        }
    }

    /// Runs the rollout and blocks until the service converges, a stage
    /// fails, or `cancel` fires. Returns the new revision's ARN.
    ///
    /// Ordering is strict: registration completes before the service update
    /// that references the new ARN, the update completes before stale-task
    /// reconciliation, and reconciliation completes before the convergence
    /// wait begins.
    pub async fn deploy(
        &self,
        rollout: &Rollout,
        cancel: CancellationToken,
    ) -> Result<String, DeployError> {
        let current = self
            .gateway
            .describe_task_definition(&rollout.family)
            .await
            .map_err(|e| DeployError::gateway(Stage::FetchTaskDefinition, e))?;

        info!(
            "Fetched task definition {} at revision {}",
            current.family, current.revision
        );

        let spec = current.derive_registration(&rollout.image, &rollout.tag);
        let retagged = current
            .container_definitions
            .iter()
            .zip(&spec.container_definitions)
            .filter(|(before, after)| before.image != after.image)
            .count();
        if retagged == 0 {
            warn!(
                "No container image in {} matches {}; registering an unchanged spec",
                rollout.family, rollout.image
            );
        }

        let arn = self
            .gateway
            .register_task_definition(&spec)
            .await
            .map_err(|e| DeployError::gateway(Stage::RegisterTaskDefinition, e))?;

        info!("Registered new revision: {}", arn);

        self.gateway
            .update_service(
                &rollout.cluster,
                &rollout.service,
                rollout.desired_count,
                Some(&arn),
            )
            .await
            .map_err(|e| DeployError::gateway(Stage::UpdateService, e))?;

        info!(
            "Service {}/{} updated to the new revision",
            rollout.cluster, rollout.service
        );

        let stopped = self
            .reconciler
            .stop_stale_tasks(&rollout.cluster, &rollout.family)
            .await?;
        if stopped > 0 {
            info!("Stopped {} stale task(s)", stopped);
        }

        self.poller
            .wait_for_convergence(&rollout.cluster, &rollout.service, &arn, cancel)
            .await?;

        info!("Deployment of {} converged", arn);

        Ok(arn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{ARN, Call, FakeGateway, deployment, task, task_definition};

    fn rollout() -> Rollout {
        Rollout {
            cluster: "default".to_string(),
            service: "web".to_string(),
            family: "web".to_string(),
            image: "123.dkr.ecr/app".to_string(),
            tag: "v2".to_string(),
            desired_count: Some(3),
        }
    }

    fn driver(gateway: &Arc<FakeGateway>) -> DeploymentDriver<FakeGateway> {
        DeploymentDriver::new(Arc::clone(gateway), DeployConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_happy_path_runs_stages_in_order() {
        let gateway = Arc::new(FakeGateway::new());
        gateway.set_task_definition(task_definition("web", "123.dkr.ecr/app:v1"));
        gateway.set_tasks(vec![task("task/b1", "other", 4)]);
        gateway.script_deployment(Some(deployment(ARN, 3, 0, 3)));

        let arn = driver(&gateway)
            .deploy(&rollout(), CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(arn, ARN);

        let calls = gateway.recorded();
        assert!(matches!(calls[0], Call::DescribeTaskDefinition { .. }));
        assert!(matches!(calls[1], Call::RegisterTaskDefinition { .. }));
        assert!(matches!(calls[2], Call::UpdateService { .. }));
        assert!(matches!(calls[3], Call::ListTasks { .. }));
        assert!(matches!(calls[4], Call::DescribeTasks { .. }));
        assert!(matches!(calls[5], Call::StopTask { .. }));
        assert!(matches!(calls[6], Call::ServiceDeployment { .. }));
        assert_eq!(calls.len(), 7);
    }

    #[tokio::test]
    async fn test_update_carries_new_arn_and_desired_count() {
        let gateway = Arc::new(FakeGateway::new());
        gateway.set_task_definition(task_definition("web", "123.dkr.ecr/app:v1"));
        gateway.script_deployment(Some(deployment(ARN, 3, 0, 3)));

        driver(&gateway)
            .deploy(&rollout(), CancellationToken::new())
            .await
            .unwrap();

        let update = gateway
            .recorded()
            .into_iter()
            .find_map(|call| match call {
                Call::UpdateService {
                    desired_count,
                    task_definition,
                    ..
                } => Some((desired_count, task_definition)),
                _ => None,
            })
            .unwrap();
        assert_eq!(update, (Some(3), Some(ARN.to_string())));
    }

    #[tokio::test]
    async fn test_register_failure_aborts_before_any_mutation() {
        let gateway = Arc::new(FakeGateway::new());
        gateway.set_task_definition(task_definition("web", "123.dkr.ecr/app:v1"));
        gateway.fail_register_with("registration rejected");

        let err = driver(&gateway)
            .deploy(&rollout(), CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DeployError::Gateway {
                stage: Stage::RegisterTaskDefinition,
                ..
            }
        ));

        let calls = gateway.recorded();
        assert!(
            calls
                .iter()
                .all(|call| !matches!(call, Call::UpdateService { .. }))
        );
        assert!(
            calls
                .iter()
                .all(|call| !matches!(call, Call::StopTask { .. }))
        );
    }

    #[tokio::test]
    async fn test_update_failure_skips_reconciliation_and_polling() {
        let gateway = Arc::new(FakeGateway::new());
        gateway.set_task_definition(task_definition("web", "123.dkr.ecr/app:v1"));
        gateway.fail_update_with("service not found");

        let err = driver(&gateway)
            .deploy(&rollout(), CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DeployError::Gateway {
                stage: Stage::UpdateService,
                ..
            }
        ));

        // The registration already happened and is not rolled back.
        let calls = gateway.recorded();
        assert!(
            calls
                .iter()
                .any(|call| matches!(call, Call::RegisterTaskDefinition { .. }))
        );
        assert!(calls.iter().all(|call| !matches!(call, Call::ListTasks { .. })));
        assert_eq!(gateway.deployment_queries(), 0);
    }
}
