//! Mock payment gateway for testing.
//!
//! Mirrors the sandbox's test nonces:
//! - a nonce containing `declined` or `rejected` produces a declined sale
//! - a nonce starting with `fake-valid` settles
//! - anything else is an unknown nonce and never becomes a transaction

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::payment::{ProviderError, TransactionStatus};
use crate::ports::{ClientToken, PaymentGateway, SaleRequest, SaleResult};

use crate::adapters::stripe::MethodCall;

/// Mock payment gateway for testing.
#[derive(Default, Clone)]
pub struct MockPaymentGateway {
    inner: Arc<Mutex<GatewayState>>,
}

#[derive(Default)]
struct GatewayState {
    sequence: u64,
    next_error: Option<ProviderError>,
    method_errors: HashMap<String, ProviderError>,
    sales: Vec<SaleRequest>,
    call_log: Vec<MethodCall>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an error to return on the next call to any method.
    pub fn set_error(&self, error: ProviderError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    /// Set an error for a specific method.
    pub fn set_method_error(&self, method: &str, error: ProviderError) {
        self.inner
            .lock()
            .unwrap()
            .method_errors
            .insert(method.to_string(), error);
    }

    pub fn clear_errors(&self) {
        let mut state = self.inner.lock().unwrap();
        state.next_error = None;
        state.method_errors.clear();
    }

    pub fn calls(&self) -> Vec<MethodCall> {
        self.inner.lock().unwrap().call_log.clone()
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    pub fn was_called(&self, method: &str) -> bool {
        self.call_count(method) > 0
    }

    /// Sales that reached the gateway, in order.
    pub fn sales(&self) -> Vec<SaleRequest> {
        self.inner.lock().unwrap().sales.clone()
    }

    fn record_call(&self, method: &str, args: Vec<String>) {
        self.inner.lock().unwrap().call_log.push(MethodCall {
            method: method.to_string(),
            args,
        });
    }

    fn check_error(&self, method: &str) -> Result<(), ProviderError> {
        let mut state = self.inner.lock().unwrap();

        if let Some(error) = state.method_errors.get(method) {
            return Err(error.clone());
        }

        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        Ok(())
    }

    fn next_id(&self) -> u64 {
        let mut state = self.inner.lock().unwrap();
        state.sequence += 1;
        state.sequence
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn generate_client_token(
        &self,
        customer_id: Option<&str>,
    ) -> Result<ClientToken, ProviderError> {
        self.record_call(
            "generate_client_token",
            vec![customer_id.unwrap_or_default().to_string()],
        );
        self.check_error("generate_client_token")?;

        let n = self.next_id();
        Ok(ClientToken(format!("mock_client_token_{}", n)))
    }

    async fn submit_sale(&self, request: SaleRequest) -> Result<SaleResult, ProviderError> {
        self.record_call(
            "submit_sale",
            vec![
                request.amount.to_string(),
                request.payment_method_nonce.clone(),
            ],
        );
        self.check_error("submit_sale")?;

        let nonce = request.payment_method_nonce.clone();
        let known = nonce.starts_with("fake-valid")
            || nonce.contains("declined")
            || nonce.contains("rejected");
        if !known {
            return Err(
                ProviderError::invalid_request("Unknown or expired payment_method_nonce.")
                    .with_provider_code("91565"),
            );
        }

        let transaction_id = format!("mock_txn_{}", self.next_id());
        let amount = request.amount.to_decimal_string();
        self.inner.lock().unwrap().sales.push(request);

        if nonce.contains("declined") {
            return Err(ProviderError::declined(
                TransactionStatus::ProcessorDeclined,
                Some(transaction_id),
                "Do Not Honor",
            ));
        }
        if nonce.contains("rejected") {
            return Err(ProviderError::declined(
                TransactionStatus::GatewayRejected,
                Some(transaction_id),
                "Transaction gateway rejected",
            ));
        }

        Ok(SaleResult {
            transaction_id,
            status: TransactionStatus::SubmittedForSettlement,
            amount,
            currency: Some("USD".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::{MinorUnits, ProviderErrorCode};

    fn sale(nonce: &str) -> SaleRequest {
        SaleRequest {
            amount: MinorUnits::new(1099),
            payment_method_nonce: nonce.to_string(),
        }
    }

    #[tokio::test]
    async fn valid_nonce_settles() {
        let mock = MockPaymentGateway::new();

        let result = mock.submit_sale(sale("fake-valid-nonce")).await.unwrap();

        assert!(result.status.is_settling_or_settled());
        assert_eq!(result.amount, "10.99");
        assert_eq!(mock.sales().len(), 1);
    }

    #[tokio::test]
    async fn declined_nonce_is_declined() {
        let mock = MockPaymentGateway::new();

        let err = mock
            .submit_sale(sale("fake-processor-declined-visa-nonce"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ProviderErrorCode::Declined);
        assert!(err.transaction_id.is_some());
    }

    #[tokio::test]
    async fn unknown_nonce_is_invalid_request() {
        let mock = MockPaymentGateway::new();

        let err = mock.submit_sale(sale("not-a-nonce")).await.unwrap_err();

        assert_eq!(err.code, ProviderErrorCode::InvalidRequest);
        assert_eq!(err.provider_code.as_deref(), Some("91565"));
        assert!(err.transaction_id.is_none());
        assert!(mock.sales().is_empty());
    }

    #[tokio::test]
    async fn tokens_are_distinct() {
        let mock = MockPaymentGateway::new();

        let a = mock.generate_client_token(None).await.unwrap();
        let b = mock.generate_client_token(Some("cust_1")).await.unwrap();

        assert_ne!(a, b);
        assert_eq!(mock.calls()[1].args, vec!["cust_1"]);
    }

    #[tokio::test]
    async fn injected_error_skips_sale() {
        let mock = MockPaymentGateway::new();
        mock.set_method_error("submit_sale", ProviderError::network("down"));

        assert!(mock.submit_sale(sale("fake-valid-nonce")).await.is_err());
        assert!(mock.sales().is_empty());

        mock.clear_errors();
        assert!(mock.submit_sale(sale("fake-valid-nonce")).await.is_ok());
    }
}
