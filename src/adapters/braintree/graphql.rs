//! Braintree GraphQL request and response shapes.

use serde::{Deserialize, Serialize};

use crate::domain::payment::{ProviderError, TransactionStatus};

pub const CLIENT_TOKEN_MUTATION: &str = "mutation createClientToken($input: CreateClientTokenInput!) { createClientToken(input: $input) { clientToken } }";
pub const CHARGE_PAYMENT_METHOD_MUTATION: &str = "mutation chargePaymentMethod($input: ChargePaymentMethodInput!) { chargePaymentMethod(input: $input) { transaction { id status amount { value currencyCode } } } }";

/// API version header value.
pub const BRAINTREE_VERSION: &str = "2019-01-01";

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
pub struct GraphQlRequest<V> {
    pub query: &'static str,
    pub variables: V,
}

#[derive(Debug, Serialize)]
pub struct InputWrapper<T> {
    pub input: T,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientTokenInput {
    pub client_token: ClientTokenOptions,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientTokenOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargePaymentMethodInput {
    /// Nonce from the client SDK.
    pub payment_method_id: String,
    pub transaction: TransactionInput,
}

#[derive(Debug, Serialize)]
pub struct TransactionInput {
    /// Major-unit decimal string.
    pub amount: String,
}

impl GraphQlRequest<InputWrapper<ClientTokenInput>> {
    pub fn client_token(customer_id: Option<&str>) -> Self {
        Self {
            query: CLIENT_TOKEN_MUTATION,
            variables: InputWrapper {
                input: ClientTokenInput {
                    client_token: ClientTokenOptions {
                        customer_id: customer_id.map(str::to_string),
                    },
                },
            },
        }
    }
}

impl GraphQlRequest<InputWrapper<ChargePaymentMethodInput>> {
    pub fn charge(payment_method_id: &str, amount: String) -> Self {
        Self {
            query: CHARGE_PAYMENT_METHOD_MUTATION,
            variables: InputWrapper {
                input: ChargePaymentMethodInput {
                    payment_method_id: payment_method_id.to_string(),
                    transaction: TransactionInput { amount },
                },
            },
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<D> {
    pub data: Option<D>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    pub extensions: Option<ErrorExtensions>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorExtensions {
    pub legacy_code: Option<String>,
    pub error_class: Option<String>,
}

impl GraphQlError {
    fn legacy_code(&self) -> Option<&str> {
        self.extensions.as_ref()?.legacy_code.as_deref()
    }

    fn error_class(&self) -> Option<&str> {
        self.extensions.as_ref()?.error_class.as_deref()
    }

    fn numeric_legacy_code(&self) -> Option<u32> {
        self.legacy_code()?.parse().ok()
    }

    /// Processor response codes 2000-2999 are declines.
    fn is_processor_decline(&self) -> bool {
        self.numeric_legacy_code()
            .is_some_and(|code| (2000..3000).contains(&code))
    }

    /// Codes 3000-3999 are processor network failures, not card declines.
    fn is_processor_outage(&self) -> bool {
        self.numeric_legacy_code()
            .is_some_and(|code| (3000..4000).contains(&code))
    }

    pub fn into_provider_error(self) -> ProviderError {
        let err = if self.is_processor_decline() {
            ProviderError::declined(TransactionStatus::ProcessorDeclined, None, self.message.clone())
        } else if self.is_processor_outage() {
            ProviderError::network(self.message.clone())
        } else {
            match self.error_class() {
                Some("AUTHENTICATION") | Some("AUTHORIZATION") => {
                    ProviderError::authentication(self.message.clone())
                }
                Some("VALIDATION") | Some("NOT_FOUND") => {
                    ProviderError::invalid_request(self.message.clone())
                }
                _ => ProviderError::provider(self.message.clone()),
            }
        };
        match self.legacy_code() {
            Some(code) => err.with_provider_code(code),
            None => err,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientTokenData {
    pub create_client_token: Option<ClientTokenPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientTokenPayload {
    pub client_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeData {
    pub charge_payment_method: Option<ChargePayload>,
}

#[derive(Debug, Deserialize)]
pub struct ChargePayload {
    pub transaction: BraintreeTransaction,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BraintreeTransaction {
    pub id: String,
    pub status: TransactionStatus,
    pub amount: Option<Money>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub value: String,
    pub currency_code: Option<String>,
}
