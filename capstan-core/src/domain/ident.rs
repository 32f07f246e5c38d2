//! Task-definition identifier parsing
//!
//! Running tasks report the revision they were launched from as a full ARN:
//! `arn:<partition>:<service>:<region>:<account>:task-definition/<family>:<revision>`.
//! Reconciliation decisions hinge on the family component, so decomposition
//! failures are surfaced as explicit errors rather than empty values.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Family and revision extracted from a task-definition ARN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDefinitionId {
    pub family: String,
    pub revision: u32,
}

/// Failure to decompose a task-definition identifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseTaskDefinitionIdError {
    #[error("expected 7 colon-delimited components, found {0}")]
    ComponentCount(usize),

    #[error("resource segment {0:?} is not task-definition/<family>")]
    ResourceKind(String),

    #[error("revision {0:?} is not a number")]
    Revision(String),
}

impl FromStr for TaskDefinitionId {
    type Err = ParseTaskDefinitionIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 7 {
            return Err(ParseTaskDefinitionIdError::ComponentCount(parts.len()));
        }

        let family = parts[5]
            .strip_prefix("task-definition/")
            .filter(|family| !family.is_empty())
            .ok_or_else(|| ParseTaskDefinitionIdError::ResourceKind(parts[5].to_string()))?;

        let revision = parts[6]
            .parse()
            .map_err(|_| ParseTaskDefinitionIdError::Revision(parts[6].to_string()))?;

        Ok(Self {
            family: family.to_string(),
            revision,
        })
    }
}

impl fmt::Display for TaskDefinitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.family, self.revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_arn() {
        let id: TaskDefinitionId = "arn:aws:ecs:us-east-1:123456789012:task-definition/web:42"
            .parse()
            .unwrap();
        assert_eq!(id.family, "web");
        assert_eq!(id.revision, 42);
    }

    #[test]
    fn test_parse_rejects_wrong_component_count() {
        let err = "arn:aws:ecs:us-east-1:task-definition/web:42"
            .parse::<TaskDefinitionId>()
            .unwrap_err();
        assert_eq!(err, ParseTaskDefinitionIdError::ComponentCount(6));

        let err = "not-an-arn".parse::<TaskDefinitionId>().unwrap_err();
        assert_eq!(err, ParseTaskDefinitionIdError::ComponentCount(1));
    }

    #[test]
    fn test_parse_rejects_other_resource_kinds() {
        let err = "arn:aws:ecs:us-east-1:123456789012:task/0f9de171:1"
            .parse::<TaskDefinitionId>()
            .unwrap_err();
        assert!(matches!(err, ParseTaskDefinitionIdError::ResourceKind(_)));

        let err = "arn:aws:ecs:us-east-1:123456789012:task-definition/:1"
            .parse::<TaskDefinitionId>()
            .unwrap_err();
        assert!(matches!(err, ParseTaskDefinitionIdError::ResourceKind(_)));
    }

    #[test]
    fn test_parse_rejects_non_numeric_revision() {
        let err = "arn:aws:ecs:us-east-1:123456789012:task-definition/web:latest"
            .parse::<TaskDefinitionId>()
            .unwrap_err();
        assert_eq!(
            err,
            ParseTaskDefinitionIdError::Revision("latest".to_string())
        );
    }

    #[test]
    fn test_display_is_family_colon_revision() {
        let id = TaskDefinitionId {
            family: "web".to_string(),
            revision: 3,
        };
        assert_eq!(id.to_string(), "web:3");
    }
}
