//! Capstan HTTP Client
//!
//! A typed HTTP client for the container-orchestration control plane.
//!
//! The control plane exposes an action-style JSON API: every operation is a
//! `POST {base_url}/v1/<Action>` with a JSON request body and a JSON (or
//! empty) response. This crate provides one method per action, organized by
//! API area: task definitions, services, and tasks.
//!
//! # Example
//!
//! ```no_run
//! use capstan_client::ClusterClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), capstan_client::ClientError> {
//!     let client = ClusterClient::new("http://localhost:9400");
//!
//!     let taskdef = client.describe_task_definition("web").await?;
//!     println!("web is at revision {}", taskdef.revision);
//!     Ok(())
//! }
//! ```

pub mod error;
mod services;
mod taskdefs;
mod tasks;

pub use error::{ClientError, Result};

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// HTTP client for the orchestration control plane
///
/// This client provides methods for all control-plane operations the
/// deployment driver consumes:
/// - Task-definition lookup and registration
/// - Service updates and rollout status
/// - Task listing, inspection, and termination
#[derive(Debug, Clone)]
pub struct ClusterClient {
    /// Base URL of the control plane (e.g., "http://localhost:9400")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

/// Error body the control plane attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl ClusterClient {
    /// Create a new control-plane client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the control plane (e.g., "http://localhost:9400")
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create a new control-plane client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the control plane
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Request/Response Handlers
    // =============================================================================

    /// Send an action request and await its raw response.
    async fn post_action<B: Serialize + ?Sized>(
        &self,
        action: &str,
        body: &B,
    ) -> Result<reqwest::Response> {
        let url = format!("{}/v1/{}", self.base_url, action);
        debug!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await?;
        Ok(response)
    }

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = serde_json::from_str::<ApiErrorBody>(&error_text)
                .map(|body| body.message)
                .unwrap_or(error_text);
            return Err(ClientError::api_error(status.as_u16(), message));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no content (e.g., acknowledgements)
    ///
    /// This method checks the status code and returns an error if the request failed.
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = serde_json::from_str::<ApiErrorBody>(&error_text)
                .map(|body| body.message)
                .unwrap_or(error_text);
            return Err(ClientError::api_error(status.as_u16(), message));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ClusterClient::new("http://localhost:9400");
        assert_eq!(client.base_url(), "http://localhost:9400");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = ClusterClient::new("http://localhost:9400/");
        assert_eq!(client.base_url(), "http://localhost:9400");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = ClusterClient::with_client("http://localhost:9400", http_client);
        assert_eq!(client.base_url(), "http://localhost:9400");
    }
}
