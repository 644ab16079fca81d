//! HTTP DTOs for relay endpoints.
//!
//! Field names follow what the mobile and web clients already send and
//! expect, so response bodies mix camelCase and snake_case.

use serde::{Deserialize, Serialize};

use crate::application::handlers::relay::PaymentSheetSession;
use crate::ports::SaleResult;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Query string of `POST /payment-sheet`.
///
/// `totalPrice` is kept as a string so a bad value is reported as a field
/// error rather than a generic query rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentSheetQuery {
    #[serde(rename = "totalPrice")]
    pub total_price: Option<String>,
}

/// Query string of `GET /api/generate/token`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateTokenQuery {
    #[serde(rename = "customerId")]
    pub customer_id: Option<String>,
}

/// Body of `POST /api/checkout`.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    pub payment_method_nonce: String,

    /// Minor currency units.
    pub amount: u64,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSecretResponse {
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSheetResponse {
    #[serde(rename = "paymentIntent")]
    pub payment_intent: String,
    #[serde(rename = "ephemeralKey")]
    pub ephemeral_key: String,
    pub customer: String,
}

impl From<PaymentSheetSession> for PaymentSheetResponse {
    fn from(session: PaymentSheetSession) -> Self {
        Self {
            payment_intent: session.payment_intent_secret,
            ephemeral_key: session.ephemeral_key_secret,
            customer: session.customer_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientTokenResponse {
    #[serde(rename = "clientToken")]
    pub client_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub success: bool,
    pub transaction: TransactionResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub id: String,
    pub status: String,
    pub amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl From<SaleResult> for CheckoutResponse {
    fn from(result: SaleResult) -> Self {
        Self {
            success: result.status.is_settling_or_settled(),
            transaction: TransactionResponse {
                id: result.transaction_id,
                status: result.status.as_str().to_string(),
                amount: result.amount,
                currency: result.currency,
            },
        }
    }
}

/// Error body for every failed relay request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Error code for programmatic handling.
    pub code: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}
