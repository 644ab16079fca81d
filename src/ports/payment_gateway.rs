//! Alternative payment-method gateway port (Braintree).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::payment::{MinorUnits, ProviderError, TransactionStatus};

/// Port for the alternative payment-method gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Request a token that initialises the gateway's client SDK.
    ///
    /// A customer is optional; the token works for guest checkout.
    async fn generate_client_token(
        &self,
        customer_id: Option<&str>,
    ) -> Result<ClientToken, ProviderError>;

    /// Charge a tokenized payment method and submit it for settlement.
    ///
    /// A declined transaction is an error with code `Declined`.
    async fn submit_sale(&self, request: SaleRequest) -> Result<SaleResult, ProviderError>;
}

/// Opaque credential for the gateway's client SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientToken(pub String);

impl ClientToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Sale of a tokenized payment method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleRequest {
    pub amount: MinorUnits,

    /// One-time token from the client SDK.
    pub payment_method_nonce: String,
}

/// Transaction produced by a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleResult {
    pub transaction_id: String,
    pub status: TransactionStatus,

    /// Major-unit decimal string as reported by the gateway.
    pub amount: String,

    pub currency: Option<String>,
}
