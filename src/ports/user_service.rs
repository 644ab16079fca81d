//! User service port.
//!
//! Login and registration belong to an external service with its own store.
//! The relay forwards the request body and hands back whatever the service
//! answered.

use async_trait::async_trait;

use crate::domain::payment::RelayError;

/// Port for the external user service.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn login(&self, body: serde_json::Value) -> Result<UserRelayResponse, RelayError>;

    async fn register(&self, body: serde_json::Value) -> Result<UserRelayResponse, RelayError>;
}

/// Reply from the user service, relayed as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRelayResponse {
    pub status: u16,
    pub body: serde_json::Value,
}
