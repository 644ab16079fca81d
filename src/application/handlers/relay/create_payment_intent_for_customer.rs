//! CreatePaymentIntentForCustomerHandler - Payment intent bound to an existing customer.

use std::sync::Arc;

use crate::domain::payment::{CurrencyCode, MinorUnits, RelayError};
use crate::ports::{CardProcessor, PaymentIntent};

#[derive(Debug, Clone)]
pub struct CreatePaymentIntentForCustomerCommand {
    pub amount: MinorUnits,
    pub currency: CurrencyCode,
    pub customer_id: String,
}

pub struct CreatePaymentIntentForCustomerHandler {
    card_processor: Arc<dyn CardProcessor>,
}

impl CreatePaymentIntentForCustomerHandler {
    pub fn new(card_processor: Arc<dyn CardProcessor>) -> Self {
        Self { card_processor }
    }

    pub async fn handle(
        &self,
        cmd: CreatePaymentIntentForCustomerCommand,
    ) -> Result<PaymentIntent, RelayError> {
        let amount = MinorUnits::positive(cmd.amount.value(), "amount")?;
        if cmd.customer_id.is_empty() {
            return Err(RelayError::validation("customer_id", "must not be empty"));
        }

        let intent = self
            .card_processor
            .create_payment_intent_for_customer(amount, cmd.currency, &cmd.customer_id)
            .await?;

        tracing::info!(
            intent_id = %intent.id,
            customer_id = %cmd.customer_id,
            amount = %amount,
            "Payment intent created for customer"
        );

        Ok(intent)
    }
}
