//! Deployment error taxonomy

use std::fmt;
use thiserror::Error;

use capstan_client::ClientError;
use capstan_core::domain::ident::ParseTaskDefinitionIdError;

/// Pipeline stage names used to annotate remote failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    FetchTaskDefinition,
    RegisterTaskDefinition,
    UpdateService,
    ListTasks,
    DescribeTasks,
    StopTask,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::FetchTaskDefinition => "fetching the current task definition",
            Stage::RegisterTaskDefinition => "registering the new task definition",
            Stage::UpdateService => "updating the service",
            Stage::ListTasks => "listing running tasks",
            Stage::DescribeTasks => "describing running tasks",
            Stage::StopTask => "stopping a stale task",
        };
        f.write_str(name)
    }
}

/// Errors surfaced by a deployment.
///
/// Nothing is retried or rolled back inside the engine: each stage's effects
/// are durable once it succeeds, and the first failure stops the pipeline.
#[derive(Debug, Error)]
pub enum DeployError {
    /// A control-plane call failed; the pipeline stopped at `stage`.
    #[error("{stage} failed: {source}")]
    Gateway {
        stage: Stage,
        #[source]
        source: ClientError,
    },

    /// A running task reported a task-definition identifier that does not
    /// decompose into family and revision.
    #[error("malformed task-definition identifier on {task_arn}: {source}")]
    MalformedTaskDefinition {
        task_arn: String,
        #[source]
        source: ParseTaskDefinitionIdError,
    },

    /// The convergence wait's status query failed.
    #[error("convergence wait aborted: {0}")]
    ConvergenceAborted(#[source] ClientError),

    /// The caller cancelled the deployment before it converged.
    #[error("deployment cancelled before convergence")]
    Cancelled,
}

impl DeployError {
    pub(crate) fn gateway(stage: Stage, source: ClientError) -> Self {
        Self::Gateway { stage, source }
    }

    /// Check if this error is a caller-initiated cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_errors_name_their_stage() {
        let err = DeployError::gateway(
            Stage::RegisterTaskDefinition,
            ClientError::api_error(500, "boom"),
        );
        let message = err.to_string();
        assert!(message.contains("registering the new task definition"));
    }

    #[test]
    fn test_cancellation_is_distinguishable() {
        assert!(DeployError::Cancelled.is_cancelled());
        assert!(
            !DeployError::ConvergenceAborted(ClientError::api_error(500, "boom")).is_cancelled()
        );
    }
}
