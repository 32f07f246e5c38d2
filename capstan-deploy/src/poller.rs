//! Convergence polling
//!
//! Re-queries rollout status on a fixed interval until the service's running
//! count matches its desired count for the target revision.

use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::DeployError;
use crate::gateway::OrchestrationGateway;

/// Blocks a deployment until its rollout reaches steady state.
pub struct ConvergencePoller<G> {
    gateway: Arc<G>,
    poll_interval: Duration,
}

impl<G: OrchestrationGateway> ConvergencePoller<G> {
    /// Creates a new poller querying through `gateway` every `poll_interval`
    pub fn new(gateway: Arc<G>, poll_interval: Duration) -> Self {
        Self {
            gateway,
            poll_interval,
        }
    }

    /// Waits until the deployment tracking `arn` reaches its desired running
    /// count, the status query fails, or `cancel` fires.
    ///
    /// The first query is issued immediately, so an already-converged service
    /// returns after a single query. At most one status query is in flight at
    /// a time. A deployment entry that has not appeared yet is propagation
    /// lag, not a failure; polling continues. There is no built-in deadline —
    /// callers attach one by cancelling the token.
    pub async fn wait_for_convergence(
        &self,
        cluster: &str,
        service: &str,
        arn: &str,
        cancel: CancellationToken,
    ) -> Result<(), DeployError> {
        let mut ticker = time::interval(self.poll_interval);

        loop {
            // Cancellation is checked first so it wins races against a tick
            // or an instantly-ready query.
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(DeployError::Cancelled),
                _ = ticker.tick() => {}
            }

            let deployment = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(DeployError::Cancelled),
                result = self.gateway.service_deployment(cluster, service, arn) => {
                    result.map_err(DeployError::ConvergenceAborted)?
                }
            };

            match deployment {
                Some(deployment) => {
                    info!(
                        desired = deployment.desired_count,
                        pending = deployment.pending_count,
                        running = deployment.running_count,
                        "Rollout progress"
                    );

                    if deployment.is_converged() {
                        return Ok(());
                    }
                }
                None => {
                    debug!("No deployment entry for {} yet", arn);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{ARN, FakeGateway, deployment};

    fn poller(gateway: &Arc<FakeGateway>) -> ConvergencePoller<FakeGateway> {
        ConvergencePoller::new(Arc::clone(gateway), Duration::from_secs(5))
    }

    #[tokio::test(start_paused = true)]
    async fn test_converges_after_scripted_sequence() {
        let gateway = Arc::new(FakeGateway::new());
        gateway.script_deployment(Some(deployment(ARN, 3, 2, 1)));
        gateway.script_deployment(Some(deployment(ARN, 3, 1, 2)));
        gateway.script_deployment(Some(deployment(ARN, 3, 0, 3)));

        poller(&gateway)
            .wait_for_convergence("default", "web", ARN, CancellationToken::new())
            .await
            .unwrap();

        // Exactly three queries: the fake panics if a fourth is issued.
        assert_eq!(gateway.deployment_queries(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_returns_immediately_when_already_converged() {
        let gateway = Arc::new(FakeGateway::new());
        gateway.script_deployment(Some(deployment(ARN, 3, 0, 3)));

        poller(&gateway)
            .wait_for_convergence("default", "web", ARN, CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(gateway.deployment_queries(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_deployment_entry_keeps_polling() {
        let gateway = Arc::new(FakeGateway::new());
        gateway.script_deployment(None);
        gateway.script_deployment(Some(deployment(ARN, 2, 0, 2)));

        poller(&gateway)
            .wait_for_convergence("default", "web", ARN, CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(gateway.deployment_queries(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_query_error_aborts_the_wait() {
        let gateway = Arc::new(FakeGateway::new());
        gateway.script_deployment(Some(deployment(ARN, 3, 2, 1)));
        gateway.script_deployment_error("control plane unavailable");

        let err = poller(&gateway)
            .wait_for_convergence("default", "web", ARN, CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, DeployError::ConvergenceAborted(_)));
        assert_eq!(gateway.deployment_queries(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pre_cancelled_token_issues_no_queries() {
        let gateway = Arc::new(FakeGateway::new());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = poller(&gateway)
            .wait_for_convergence("default", "web", ARN, cancel)
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(gateway.deployment_queries(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_stops_further_ticks() {
        let gateway = Arc::new(FakeGateway::new());
        gateway.script_deployment(Some(deployment(ARN, 3, 2, 1)));

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        let handle = tokio::spawn(async move {
            time::sleep(Duration::from_secs(1)).await;
            trigger.cancel();
        });

        let err = poller(&gateway)
            .wait_for_convergence("default", "web", ARN, cancel)
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(gateway.deployment_queries(), 1);
        handle.await.unwrap();
    }
}
