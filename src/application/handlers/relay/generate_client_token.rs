//! GenerateClientTokenHandler - Query handler for gateway client tokens.

use std::sync::Arc;

use crate::domain::payment::RelayError;
use crate::ports::{ClientToken, PaymentGateway};

/// Query for a client token, optionally bound to a gateway customer.
#[derive(Debug, Clone, Default)]
pub struct GenerateClientTokenQuery {
    pub customer_id: Option<String>,
}

pub struct GenerateClientTokenHandler {
    payment_gateway: Arc<dyn PaymentGateway>,
}

impl GenerateClientTokenHandler {
    pub fn new(payment_gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { payment_gateway }
    }

    pub async fn handle(&self, query: GenerateClientTokenQuery) -> Result<ClientToken, RelayError> {
        // An empty customerId is the same as none
        let customer_id = query.customer_id.as_deref().filter(|id| !id.trim().is_empty());

        let token = self.payment_gateway.generate_client_token(customer_id).await?;
        Ok(token)
    }
}
