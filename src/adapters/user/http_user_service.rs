//! HTTP client for the external user service.
//!
//! Login and registration bodies are posted unchanged to
//! `{base_url}/login` and `{base_url}/register`. Whatever status and JSON the
//! service answers with is handed back to the caller.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::domain::payment::{ProviderError, RelayError};
use crate::ports::{UserRelayResponse, UserService};

/// User service reached over HTTP.
pub struct HttpUserService {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpUserService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn forward(&self, path: &str, body: Value) -> Result<UserRelayResponse, RelayError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http_client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(path, error = %e, "User service request failed");
                RelayError::Provider(ProviderError::network("User service is unreachable"))
            })?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| {
            tracing::error!(path, error = %e, "Failed to read user service response");
            RelayError::Provider(ProviderError::network(
                "Failed to read user service response",
            ))
        })?;

        // Non-JSON replies are wrapped so the relay always answers with JSON
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or_else(|_| json!({ "message": text }))
        };

        tracing::debug!(path, status, "User service replied");

        Ok(UserRelayResponse { status, body })
    }
}

#[async_trait]
impl UserService for HttpUserService {
    async fn login(&self, body: Value) -> Result<UserRelayResponse, RelayError> {
        self.forward("/login", body).await
    }

    async fn register(&self, body: Value) -> Result<UserRelayResponse, RelayError> {
        self.forward("/register", body).await
    }
}
