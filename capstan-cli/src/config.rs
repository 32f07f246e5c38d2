//! Configuration module
//!
//! Handles CLI configuration, currently just the control-plane endpoint.

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the control plane
    pub endpoint: String,
}
