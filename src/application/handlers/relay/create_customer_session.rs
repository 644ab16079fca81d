//! CreateEphemeralCustomerSessionHandler - Creates a customer and an ephemeral key for it.

use std::sync::Arc;

use crate::domain::payment::RelayError;
use crate::ports::CardProcessor;

/// Command to create a fresh customer with a scoped ephemeral key.
#[derive(Debug, Clone)]
pub struct CreateEphemeralCustomerSessionCommand {
    /// API version the mobile SDK was built against.
    pub api_version: String,
}

/// A new customer plus the key the mobile SDK uses to act on its behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EphemeralCustomerSession {
    pub customer_id: String,
    pub ephemeral_key_secret: String,
}

/// Handler for ephemeral customer sessions.
///
/// Not idempotent: each call creates a new customer.
pub struct CreateEphemeralCustomerSessionHandler {
    card_processor: Arc<dyn CardProcessor>,
}

impl CreateEphemeralCustomerSessionHandler {
    pub fn new(card_processor: Arc<dyn CardProcessor>) -> Self {
        Self { card_processor }
    }

    pub async fn handle(
        &self,
        cmd: CreateEphemeralCustomerSessionCommand,
    ) -> Result<EphemeralCustomerSession, RelayError> {
        if cmd.api_version.trim().is_empty() {
            return Err(RelayError::validation("api_version", "must not be empty"));
        }

        let customer = self.card_processor.create_customer().await?;
        let key = self
            .card_processor
            .create_ephemeral_key(&customer.id, &cmd.api_version)
            .await?;

        tracing::debug!(customer_id = %customer.id, "Ephemeral customer session created");

        Ok(EphemeralCustomerSession {
            customer_id: customer.id,
            ephemeral_key_secret: key.secret,
        })
    }
}
