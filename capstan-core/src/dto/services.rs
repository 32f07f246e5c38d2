//! Service action payloads

use serde::{Deserialize, Serialize};

use crate::domain::service::Service;

/// Request for the `UpdateService` action.
///
/// Both mutations are optional: an absent `desiredCount` leaves the service's
/// current count untouched, and an absent `taskDefinition` keeps the revision
/// the service already targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceRequest {
    pub cluster: String,
    pub service: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_definition: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeServicesRequest {
    pub cluster: String,
    pub services: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeServicesResponse {
    #[serde(default)]
    pub services: Vec<Service>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_service_omits_unset_fields() {
        let request = UpdateServiceRequest {
            cluster: "default".to_string(),
            service: "web".to_string(),
            desired_count: None,
            task_definition: Some(
                "arn:aws:ecs:us-east-1:123456789012:task-definition/web:2".to_string(),
            ),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("desiredCount").is_none());
        assert_eq!(
            json["taskDefinition"],
            "arn:aws:ecs:us-east-1:123456789012:task-definition/web:2"
        );
    }

    #[test]
    fn test_wire_fields_are_camel_case() {
        let request = UpdateServiceRequest {
            cluster: "default".to_string(),
            service: "web".to_string(),
            desired_count: Some(3),
            task_definition: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["desiredCount"], 3);
        assert!(json.get("desired_count").is_none());
    }
}
