//! CreatePaymentIntentHandler - Command handler for the fixed-price checkout.

use std::sync::Arc;

use crate::domain::payment::{CurrencyCode, MinorUnits, RelayError};
use crate::ports::{CardProcessor, PaymentIntentRequest};

/// Command to create a payment intent for the configured checkout.
#[derive(Debug, Clone)]
pub struct CreatePaymentIntentCommand {
    pub amount: MinorUnits,
    pub currency: CurrencyCode,
    pub allowed_methods: Vec<String>,
}

/// Result of a created payment intent.
#[derive(Debug, Clone)]
pub struct CreatePaymentIntentResult {
    pub intent_id: String,
    pub client_secret: String,
}

/// Handler for creating payment intents.
///
/// Every call creates a new intent; nothing is cached or deduplicated.
pub struct CreatePaymentIntentHandler {
    card_processor: Arc<dyn CardProcessor>,
}

impl CreatePaymentIntentHandler {
    pub fn new(card_processor: Arc<dyn CardProcessor>) -> Self {
        Self { card_processor }
    }

    pub async fn handle(
        &self,
        cmd: CreatePaymentIntentCommand,
    ) -> Result<CreatePaymentIntentResult, RelayError> {
        let amount = MinorUnits::positive(cmd.amount.value(), "amount")?;

        let request =
            PaymentIntentRequest::new(amount, cmd.currency).with_allowed_methods(cmd.allowed_methods);
        let intent = self.card_processor.create_payment_intent(request).await?;

        tracing::info!(intent_id = %intent.id, amount = %amount, "Payment intent created");

        Ok(CreatePaymentIntentResult {
            intent_id: intent.id,
            client_secret: intent.client_secret,
        })
    }
}
