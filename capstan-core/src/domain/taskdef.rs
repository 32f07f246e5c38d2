//! Task-definition domain types
//!
//! A task definition is a versioned template describing the containers a
//! service runs together. Revisions are grouped under a stable family name;
//! revision numbers are assigned by the control plane at registration time,
//! never by the client.

use serde::{Deserialize, Serialize};

/// A task-definition revision as returned by the control plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDefinition {
    pub family: String,
    pub revision: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_definition_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_role_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_mode: Option<String>,
    pub container_definitions: Vec<ContainerDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<Volume>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub placement_constraints: Vec<PlacementConstraint>,
}

/// One container slot within a task definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerDefinition {
    pub name: String,
    /// Image reference of the form `<repository>[:<tag>]`.
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub essential: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environment: Vec<KeyValuePair>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub port_mappings: Vec<PortMapping>,
}

/// Name/value pair used for container environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValuePair {
    pub name: String,
    pub value: String,
}

/// Port exposed by a container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortMapping {
    pub container_port: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

/// A data volume shared by a task's containers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<VolumeHost>,
}

/// Host-path backing for a volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeHost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
}

/// A placement rule constraining where a task may run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementConstraint {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub constraint_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
}

/// Registration payload for a new task-definition revision.
///
/// The control plane treats a registration as a full replacement of the
/// previous revision, not a patch, so every field of the source snapshot must
/// be carried over verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDefinitionSpec {
    pub family: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_role_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_mode: Option<String>,
    pub container_definitions: Vec<ContainerDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<Volume>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub placement_constraints: Vec<PlacementConstraint>,
}

impl TaskDefinition {
    /// Derives the registration payload for a new revision with `image`
    /// retagged.
    ///
    /// Every container whose image reference starts with `image` is rewritten
    /// to `image:tag`; all other containers pass through unchanged, as do the
    /// task role, network mode, volumes, and placement constraints. A snapshot
    /// with no matching container produces a spec identical to its source.
    pub fn derive_registration(&self, image: &str, tag: &str) -> TaskDefinitionSpec {
        let container_definitions = self
            .container_definitions
            .iter()
            .map(|container| {
                let mut container = container.clone();
                if container.image.starts_with(image) {
                    container.image = format!("{}:{}", image, tag);
                }
                container
            })
            .collect();

        TaskDefinitionSpec {
            family: self.family.clone(),
            task_role_arn: self.task_role_arn.clone(),
            network_mode: self.network_mode.clone(),
            container_definitions,
            volumes: self.volumes.clone(),
            placement_constraints: self.placement_constraints.clone(),
        }
    }
}
