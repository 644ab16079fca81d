//! Stripe API objects as they arrive in REST responses.
//!
//! Only the fields the relay reads are modelled; Stripe adds fields freely.

use serde::{Deserialize, Serialize};

use crate::domain::payment::ProviderError;

/// Payment intent object (`pi_...`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripePaymentIntent {
    pub id: String,

    /// Secret used by the client SDK (`pi_..._secret_...`).
    pub client_secret: Option<String>,

    pub amount: i64,

    pub currency: String,

    pub status: String,

    pub customer: Option<String>,
}

/// Customer object (`cus_...`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripeCustomer {
    pub id: String,

    /// Unix timestamp of creation.
    #[serde(default)]
    pub created: i64,
}

/// Ephemeral key object (`ephkey_...`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripeEphemeralKey {
    pub id: String,

    pub secret: String,

    /// Unix timestamp after which the key is unusable.
    #[serde(default)]
    pub expires: i64,
}

/// Error envelope returned with every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripeErrorEnvelope {
    pub error: StripeApiError,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripeApiError {
    /// `card_error`, `invalid_request_error`, `api_error`, ...
    #[serde(rename = "type")]
    pub error_type: String,

    pub code: Option<String>,

    pub decline_code: Option<String>,

    pub message: Option<String>,
}

impl StripeApiError {
    /// Convert to a provider error, keeping Stripe's own message and code.
    pub fn into_provider_error(self, http_status: u16) -> ProviderError {
        let message = self
            .message
            .unwrap_or_else(|| format!("Stripe returned {}", self.error_type));

        let err = match self.error_type.as_str() {
            "card_error" => ProviderError::from_status(402, message),
            "authentication_error" => ProviderError::authentication(message),
            "rate_limit_error" => ProviderError::rate_limited(message),
            "invalid_request_error" => ProviderError::invalid_request(message),
            _ => ProviderError::from_status(http_status, message),
        };

        match self.decline_code.or(self.code) {
            Some(code) => err.with_provider_code(code),
            None => err,
        }
    }
}
