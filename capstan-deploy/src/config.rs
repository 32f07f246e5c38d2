//! Deployment configuration
//!
//! All knobs are carried in an explicit struct passed to each component at
//! construction; there is no process-wide state.

use std::time::Duration;
use thiserror::Error;

/// Configuration for a deployment run.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    /// Control-plane base URL (e.g., "http://localhost:9400")
    pub endpoint: String,

    /// How often the convergence poller re-queries rollout status
    pub poll_interval: Duration,
}

/// Invalid or missing configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("endpoint cannot be empty")]
    EmptyEndpoint,

    #[error("endpoint must start with http:// or https://")]
    InvalidEndpoint,

    #[error("poll_interval must be greater than 0")]
    ZeroPollInterval,

    #[error("{0} environment variable not set")]
    MissingEnv(&'static str),
}

impl DeployConfig {
    /// Creates a new configuration with defaults
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            poll_interval: Duration::from_secs(5),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - CAPSTAN_ENDPOINT (required)
    /// - CAPSTAN_POLL_INTERVAL (optional, seconds, default: 5)
    pub fn from_env() -> Result<Self, ConfigError> {
        let endpoint = std::env::var("CAPSTAN_ENDPOINT")
            .map_err(|_| ConfigError::MissingEnv("CAPSTAN_ENDPOINT"))?;

        let poll_interval = std::env::var("CAPSTAN_POLL_INTERVAL")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(5));

        Ok(Self {
            endpoint,
            poll_interval,
        })
    }

    /// Overrides the poll interval
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(ConfigError::InvalidEndpoint);
        }

        if self.poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }

        Ok(())
    }
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self::new("http://localhost:9400")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DeployConfig::default();
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = DeployConfig::default();
        assert!(config.validate().is_ok());

        config.endpoint = String::new();
        assert_eq!(config.validate(), Err(ConfigError::EmptyEndpoint));

        config.endpoint = "not-a-url".to_string();
        assert_eq!(config.validate(), Err(ConfigError::InvalidEndpoint));

        config.endpoint = "http://localhost:9400".to_string();
        config.poll_interval = Duration::ZERO;
        assert_eq!(config.validate(), Err(ConfigError::ZeroPollInterval));
    }

    #[test]
    fn test_with_poll_interval() {
        let config = DeployConfig::default().with_poll_interval(Duration::from_secs(1));
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }
}
