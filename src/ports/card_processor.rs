//! Card processor port.
//!
//! Defines the contract for the card-payment processor (Stripe): payment
//! intents, customers, and ephemeral keys for the mobile payment sheet.
//!
//! # Design
//!
//! - **Not idempotent**: no idempotency keys are sent, every call creates a
//!   new provider-side object
//! - **No retries**: a failure is returned to the caller exactly once

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::payment::{CurrencyCode, MinorUnits, ProviderError};

/// Port for the card-payment processor.
#[async_trait]
pub trait CardProcessor: Send + Sync {
    /// Create a payment intent.
    ///
    /// When `customer_id` is set the intent is attached to that customer.
    async fn create_payment_intent(
        &self,
        request: PaymentIntentRequest,
    ) -> Result<PaymentIntent, ProviderError>;

    /// Create a payment intent attached to an existing customer.
    async fn create_payment_intent_for_customer(
        &self,
        amount: MinorUnits,
        currency: CurrencyCode,
        customer_id: &str,
    ) -> Result<PaymentIntent, ProviderError> {
        let request = PaymentIntentRequest::new(amount, currency).for_customer(customer_id);
        self.create_payment_intent(request).await
    }

    /// Create a new, empty customer record.
    async fn create_customer(&self) -> Result<Customer, ProviderError>;

    /// Create a short-lived key scoped to one customer and API version.
    async fn create_ephemeral_key(
        &self,
        customer_id: &str,
        api_version: &str,
    ) -> Result<EphemeralKey, ProviderError>;
}

/// Request to create a payment intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntentRequest {
    /// Amount in the currency's smallest unit.
    pub amount: MinorUnits,

    /// Lowercase ISO 4217 currency.
    pub currency: CurrencyCode,

    /// Allowed payment method types. Empty leaves the choice to the processor.
    pub allowed_methods: Vec<String>,

    /// Customer the intent belongs to.
    pub customer_id: Option<String>,
}

impl PaymentIntentRequest {
    pub fn new(amount: MinorUnits, currency: CurrencyCode) -> Self {
        Self {
            amount,
            currency,
            allowed_methods: Vec::new(),
            customer_id: None,
        }
    }

    /// Restrict the allowed payment methods; duplicates are dropped.
    pub fn with_allowed_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for method in methods {
            let method = method.into();
            if !self.allowed_methods.contains(&method) {
                self.allowed_methods.push(method);
            }
        }
        self
    }

    pub fn for_customer(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }
}

/// Payment intent created by the processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Processor's intent ID.
    pub id: String,

    /// Secret handed to the client SDK to confirm the intent.
    pub client_secret: String,
}

/// Customer record in the processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
}

/// Ephemeral key scoped to a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EphemeralKey {
    pub id: String,
    pub secret: String,
}
