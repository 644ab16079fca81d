//! SubmitSaleHandler - Command handler for gateway checkout.

use std::sync::Arc;

use crate::domain::payment::{MinorUnits, RelayError};
use crate::ports::{PaymentGateway, SaleRequest, SaleResult};

/// Command to charge a tokenized payment method.
#[derive(Debug, Clone)]
pub struct SubmitSaleCommand {
    pub amount: MinorUnits,
    pub payment_method_nonce: String,
}

/// Handler for sales.
///
/// Sales settle automatically. No idempotency key is sent, so two identical
/// commands produce two transactions.
pub struct SubmitSaleHandler {
    payment_gateway: Arc<dyn PaymentGateway>,
}

impl SubmitSaleHandler {
    pub fn new(payment_gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { payment_gateway }
    }

    pub async fn handle(&self, cmd: SubmitSaleCommand) -> Result<SaleResult, RelayError> {
        let amount = MinorUnits::positive(cmd.amount.value(), "amount")?;
        let nonce = cmd.payment_method_nonce.trim();
        if nonce.is_empty() {
            return Err(RelayError::validation(
                "payment_method_nonce",
                "must not be empty",
            ));
        }

        let result = self
            .payment_gateway
            .submit_sale(SaleRequest {
                amount,
                payment_method_nonce: nonce.to_string(),
            })
            .await?;

        Ok(result)
    }
}
