//! Scripted control-plane fake for engine tests
//!
//! Records every call in arrival order and replays canned responses, so tests
//! can assert on pipeline ordering and call counts without a network.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use capstan_client::ClientError;
use capstan_core::domain::service::Deployment;
use capstan_core::domain::task::Task;
use capstan_core::domain::taskdef::{ContainerDefinition, TaskDefinition, TaskDefinitionSpec};

use crate::gateway::OrchestrationGateway;

/// ARN the fake assigns to registrations.
pub const ARN: &str = "arn:aws:ecs:us-east-1:123456789012:task-definition/web:2";

/// A call observed by the fake, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    DescribeTaskDefinition {
        family: String,
    },
    RegisterTaskDefinition {
        family: String,
    },
    UpdateService {
        cluster: String,
        service: String,
        desired_count: Option<i64>,
        task_definition: Option<String>,
    },
    ListTasks {
        cluster: String,
    },
    DescribeTasks {
        cluster: String,
    },
    StopTask {
        cluster: String,
        task_arn: String,
    },
    ServiceDeployment {
        cluster: String,
        service: String,
        arn: String,
    },
}

fn remote(message: &str) -> ClientError {
    ClientError::api_error(500, message)
}

#[derive(Default)]
pub struct FakeGateway {
    calls: Mutex<Vec<Call>>,
    task_definition: Mutex<Option<TaskDefinition>>,
    fail_register: Mutex<Option<String>>,
    fail_update: Mutex<Option<String>>,
    fail_stop: Mutex<Option<String>>,
    tasks: Mutex<Vec<Task>>,
    deployments: Mutex<VecDeque<Result<Option<Deployment>, String>>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_task_definition(&self, task_definition: TaskDefinition) {
        *self.task_definition.lock().unwrap() = Some(task_definition);
    }

    pub fn set_tasks(&self, tasks: Vec<Task>) {
        *self.tasks.lock().unwrap() = tasks;
    }

    pub fn fail_register_with(&self, message: &str) {
        *self.fail_register.lock().unwrap() = Some(message.to_string());
    }

    pub fn fail_update_with(&self, message: &str) {
        *self.fail_update.lock().unwrap() = Some(message.to_string());
    }

    pub fn fail_stop_with(&self, message: &str) {
        *self.fail_stop.lock().unwrap() = Some(message.to_string());
    }

    /// Queues the response for the next status query.
    pub fn script_deployment(&self, deployment: Option<Deployment>) {
        self.deployments.lock().unwrap().push_back(Ok(deployment));
    }

    /// Queues a failure for the next status query.
    pub fn script_deployment_error(&self, message: &str) {
        self.deployments
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    pub fn recorded(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn deployment_queries(&self) -> usize {
        self.recorded()
            .iter()
            .filter(|call| matches!(call, Call::ServiceDeployment { .. }))
            .count()
    }

    pub fn stopped_tasks(&self) -> Vec<String> {
        self.recorded()
            .into_iter()
            .filter_map(|call| match call {
                Call::StopTask { task_arn, .. } => Some(task_arn),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl OrchestrationGateway for FakeGateway {
    async fn describe_task_definition(&self, family: &str) -> Result<TaskDefinition, ClientError> {
        self.record(Call::DescribeTaskDefinition {
            family: family.to_string(),
        });
        self.task_definition
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| remote("no task definition scripted"))
    }

    async fn register_task_definition(
        &self,
        spec: &TaskDefinitionSpec,
    ) -> Result<String, ClientError> {
        self.record(Call::RegisterTaskDefinition {
            family: spec.family.clone(),
        });
        if let Some(message) = self.fail_register.lock().unwrap().clone() {
            return Err(remote(&message));
        }
        Ok(ARN.to_string())
    }

    async fn update_service(
        &self,
        cluster: &str,
        service: &str,
        desired_count: Option<i64>,
        task_definition: Option<&str>,
    ) -> Result<(), ClientError> {
        self.record(Call::UpdateService {
            cluster: cluster.to_string(),
            service: service.to_string(),
            desired_count,
            task_definition: task_definition.map(str::to_string),
        });
        if let Some(message) = self.fail_update.lock().unwrap().clone() {
            return Err(remote(&message));
        }
        Ok(())
    }

    async fn list_tasks(&self, cluster: &str) -> Result<Vec<String>, ClientError> {
        self.record(Call::ListTasks {
            cluster: cluster.to_string(),
        });
        Ok(self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .map(|task| task.task_arn.clone())
            .collect())
    }

    async fn describe_tasks(
        &self,
        cluster: &str,
        _task_arns: &[String],
    ) -> Result<Vec<Task>, ClientError> {
        self.record(Call::DescribeTasks {
            cluster: cluster.to_string(),
        });
        Ok(self.tasks.lock().unwrap().clone())
    }

    async fn stop_task(
        &self,
        cluster: &str,
        task_arn: &str,
        _reason: Option<&str>,
    ) -> Result<(), ClientError> {
        self.record(Call::StopTask {
            cluster: cluster.to_string(),
            task_arn: task_arn.to_string(),
        });
        if let Some(message) = self.fail_stop.lock().unwrap().clone() {
            return Err(remote(&message));
        }
        Ok(())
    }

    async fn service_deployment(
        &self,
        cluster: &str,
        service: &str,
        arn: &str,
    ) -> Result<Option<Deployment>, ClientError> {
        self.record(Call::ServiceDeployment {
            cluster: cluster.to_string(),
            service: service.to_string(),
            arn: arn.to_string(),
        });
        let scripted = self
            .deployments
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted status response left");
        scripted.map_err(|message| remote(&message))
    }
}

/// Builds a single-container task-definition snapshot for `family`.
pub fn task_definition(family: &str, image: &str) -> TaskDefinition {
    TaskDefinition {
        family: family.to_string(),
        revision: 1,
        task_definition_arn: Some(format!(
            "arn:aws:ecs:us-east-1:123456789012:task-definition/{}:1",
            family
        )),
        task_role_arn: None,
        network_mode: Some("bridge".to_string()),
        container_definitions: vec![ContainerDefinition {
            name: "app".to_string(),
            image: image.to_string(),
            cpu: None,
            memory: Some(512),
            essential: Some(true),
            environment: Vec::new(),
            port_mappings: Vec::new(),
        }],
        volumes: Vec::new(),
        placement_constraints: Vec::new(),
    }
}

/// Builds a running task launched from `family` at `revision`.
pub fn task(arn_suffix: &str, family: &str, revision: u32) -> Task {
    Task {
        task_arn: format!("arn:aws:ecs:us-east-1:123456789012:{}", arn_suffix),
        task_definition_arn: format!(
            "arn:aws:ecs:us-east-1:123456789012:task-definition/{}:{}",
            family, revision
        ),
        last_status: Some("RUNNING".to_string()),
        desired_status: Some("RUNNING".to_string()),
        started_at: None,
    }
}

/// Builds a deployment record for `arn` with the given counts.
pub fn deployment(arn: &str, desired: i64, pending: i64, running: i64) -> Deployment {
    Deployment {
        id: Some("deploy-1".to_string()),
        status: Some("PRIMARY".to_string()),
        task_definition: arn.to_string(),
        desired_count: desired,
        pending_count: pending,
        running_count: running,
    }
}
