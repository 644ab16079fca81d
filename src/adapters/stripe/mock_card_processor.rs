//! Mock card processor for testing.
//!
//! Provides a configurable implementation of `CardProcessor` for unit and
//! integration tests. Supports:
//! - Error injection (one-shot or per method)
//! - Call tracking
//! - Fresh IDs and secrets on every call, like the real processor

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::payment::ProviderError;
use crate::ports::{CardProcessor, Customer, EphemeralKey, PaymentIntent, PaymentIntentRequest};

/// Mock card processor for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockCardProcessor::new();
/// mock.set_method_error("create_customer", ProviderError::network("down"));
///
/// let result = mock.create_customer().await;
/// assert!(result.is_err());
/// ```
#[derive(Default)]
pub struct MockCardProcessor {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Monotonic counter used to mint IDs.
    sequence: u64,

    /// Error to return on next call.
    next_error: Option<ProviderError>,

    /// Specific errors by method name.
    method_errors: HashMap<String, ProviderError>,

    /// Every payment intent request received.
    intent_requests: Vec<PaymentIntentRequest>,

    call_log: Vec<MethodCall>,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

impl MockCardProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

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

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    pub fn calls(&self) -> Vec<MethodCall> {
        self.inner.lock().unwrap().call_log.clone()
    }

    pub fn was_called(&self, method: &str) -> bool {
        self.call_count(method) > 0
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

    /// Payment intent requests in the order they arrived.
    pub fn intent_requests(&self) -> Vec<PaymentIntentRequest> {
        self.inner.lock().unwrap().intent_requests.clone()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Internal Helpers
    // ════════════════════════════════════════════════════════════════════════════

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

        // Global error is consumed
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

impl Clone for MockCardProcessor {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl CardProcessor for MockCardProcessor {
    async fn create_payment_intent(
        &self,
        request: PaymentIntentRequest,
    ) -> Result<PaymentIntent, ProviderError> {
        self.record_call(
            "create_payment_intent",
            vec![
                request.amount.to_string(),
                request.currency.to_string(),
                request.customer_id.clone().unwrap_or_default(),
            ],
        );
        self.check_error("create_payment_intent")?;

        self.inner.lock().unwrap().intent_requests.push(request);
        let n = self.next_id();

        Ok(PaymentIntent {
            id: format!("pi_mock_{}", n),
            client_secret: format!("pi_mock_{}_secret_{}", n, n * 7919),
        })
    }

    async fn create_customer(&self) -> Result<Customer, ProviderError> {
        self.record_call("create_customer", vec![]);
        self.check_error("create_customer")?;

        Ok(Customer {
            id: format!("cus_mock_{}", self.next_id()),
        })
    }

    async fn create_ephemeral_key(
        &self,
        customer_id: &str,
        api_version: &str,
    ) -> Result<EphemeralKey, ProviderError> {
        self.record_call(
            "create_ephemeral_key",
            vec![customer_id.to_string(), api_version.to_string()],
        );
        self.check_error("create_ephemeral_key")?;

        let n = self.next_id();
        Ok(EphemeralKey {
            id: format!("ephkey_mock_{}", n),
            secret: format!("ek_test_mock_{}", n),
        })
    }
}
