//! CreatePaymentSheetHandler - Everything the mobile payment sheet needs in one call.
//!
//! Steps, in order: create a customer, mint an ephemeral key for it, then
//! create a payment intent for that customer. A failure at any step aborts
//! the rest; objects created by earlier steps are left in place.

use std::sync::Arc;

use crate::domain::payment::{CurrencyCode, MinorUnits, RelayError};
use crate::ports::CardProcessor;

use super::create_customer_session::{
    CreateEphemeralCustomerSessionCommand, CreateEphemeralCustomerSessionHandler,
};
use super::create_payment_intent_for_customer::{
    CreatePaymentIntentForCustomerCommand, CreatePaymentIntentForCustomerHandler,
};

#[derive(Debug, Clone)]
pub struct CreatePaymentSheetCommand {
    pub total_price: MinorUnits,
    pub currency: CurrencyCode,
    pub api_version: String,
}

/// Secrets handed to the payment sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSheetSession {
    pub customer_id: String,
    pub ephemeral_key_secret: String,
    pub payment_intent_secret: String,
}

pub struct CreatePaymentSheetHandler {
    sessions: CreateEphemeralCustomerSessionHandler,
    intents: CreatePaymentIntentForCustomerHandler,
}

impl CreatePaymentSheetHandler {
    pub fn new(card_processor: Arc<dyn CardProcessor>) -> Self {
        Self {
            sessions: CreateEphemeralCustomerSessionHandler::new(card_processor.clone()),
            intents: CreatePaymentIntentForCustomerHandler::new(card_processor),
        }
    }

    pub async fn handle(
        &self,
        cmd: CreatePaymentSheetCommand,
    ) -> Result<PaymentSheetSession, RelayError> {
        // Reject before any provider-side object is created
        let total_price = MinorUnits::positive(cmd.total_price.value(), "totalPrice")?;

        let session = self
            .sessions
            .handle(CreateEphemeralCustomerSessionCommand {
                api_version: cmd.api_version,
            })
            .await?;

        let intent = self
            .intents
            .handle(CreatePaymentIntentForCustomerCommand {
                amount: total_price,
                currency: cmd.currency,
                customer_id: session.customer_id.clone(),
            })
            .await?;

        Ok(PaymentSheetSession {
            customer_id: session.customer_id,
            ephemeral_key_secret: session.ephemeral_key_secret,
            payment_intent_secret: intent.client_secret,
        })
    }
}
