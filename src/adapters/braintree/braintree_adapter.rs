//! Braintree gateway adapter.
//!
//! Implements the `PaymentGateway` trait against the Braintree GraphQL API.
//! Sales use `chargePaymentMethod`, which authorizes and submits for
//! settlement in one call.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{BraintreeEnvironment, PaymentConfig};
use crate::domain::payment::ProviderError;
use crate::ports::{ClientToken, PaymentGateway, SaleRequest, SaleResult};

use super::graphql::{ChargeData, ClientTokenData, GraphQlRequest, GraphQlResponse, BRAINTREE_VERSION};

const SANDBOX_URL: &str = "https://payments.sandbox.braintree-api.com/graphql";
const PRODUCTION_URL: &str = "https://payments.braintree-api.com/graphql";

/// Braintree API configuration.
#[derive(Clone)]
pub struct BraintreeConfig {
    merchant_id: String,
    public_key: String,
    private_key: SecretString,
    api_url: String,
}

impl BraintreeConfig {
    pub fn new(
        environment: BraintreeEnvironment,
        merchant_id: impl Into<String>,
        public_key: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Self {
        let api_url = match environment {
            BraintreeEnvironment::Sandbox => SANDBOX_URL,
            BraintreeEnvironment::Production => PRODUCTION_URL,
        };
        Self {
            merchant_id: merchant_id.into(),
            public_key: public_key.into(),
            private_key: SecretString::new(private_key.into()),
            api_url: api_url.to_string(),
        }
    }

    /// Build from the application's payment settings.
    pub fn from_settings(settings: &PaymentConfig) -> Self {
        let config = Self::new(
            settings.braintree_environment,
            settings.braintree_merchant_id.clone(),
            settings.braintree_public_key.clone(),
            settings.braintree_private_key.clone(),
        );
        match &settings.braintree_api_url {
            Some(url) => config.with_api_url(url.clone()),
            None => config,
        }
    }

    /// Point at a different GraphQL endpoint (for testing).
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }
}

/// Braintree payment gateway adapter.
pub struct BraintreeGatewayAdapter {
    config: BraintreeConfig,
    http_client: reqwest::Client,
}

impl BraintreeGatewayAdapter {
    pub fn new(config: BraintreeConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Execute one GraphQL operation. GraphQL-level errors win over data.
    async fn execute<V: Serialize, D: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: &GraphQlRequest<V>,
    ) -> Result<D, ProviderError> {
        let response = self
            .http_client
            .post(&self.config.api_url)
            .basic_auth(
                &self.config.public_key,
                Some(self.config.private_key.expose_secret()),
            )
            .header("Braintree-Version", BRAINTREE_VERSION)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(operation, error = %e, "Braintree request failed");
                ProviderError::network("Could not reach Braintree")
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!(operation, error = %e, "Failed to read Braintree response");
            ProviderError::network("Failed to read Braintree response")
        })?;

        let parsed: GraphQlResponse<D> = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(e) if status.is_success() => {
                tracing::error!(operation, error = %e, "Failed to parse Braintree response");
                return Err(ProviderError::invalid_response(
                    "Braintree returned an unreadable response",
                ));
            }
            Err(_) => {
                tracing::error!(operation, status = status.as_u16(), "Braintree {} failed", operation);
                tracing::debug!(operation, body = %body, "Braintree error body");
                return Err(ProviderError::from_status(
                    status.as_u16(),
                    format!("Braintree API error (HTTP {})", status.as_u16()),
                ));
            }
        };

        if let Some(first) = parsed.errors.into_iter().next() {
            let err = first.into_provider_error();
            tracing::warn!(
                operation,
                merchant_id = %self.config.merchant_id,
                code = %err.code,
                provider_code = ?err.provider_code,
                message = %err.message,
                "Braintree {} returned an error",
                operation
            );
            return Err(err);
        }

        parsed.data.ok_or_else(|| {
            ProviderError::invalid_response(format!("Braintree {} returned no data", operation))
        })
    }
}

#[async_trait]
impl PaymentGateway for BraintreeGatewayAdapter {
    async fn generate_client_token(
        &self,
        customer_id: Option<&str>,
    ) -> Result<ClientToken, ProviderError> {
        let request = GraphQlRequest::client_token(customer_id);
        let data: ClientTokenData = self.execute("createClientToken", &request).await?;

        let token = data
            .create_client_token
            .map(|payload| payload.client_token)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ProviderError::invalid_response("Braintree returned no client token"))?;

        Ok(ClientToken(token))
    }

    async fn submit_sale(&self, request: SaleRequest) -> Result<SaleResult, ProviderError> {
        let amount = request.amount.to_decimal_string();
        let graphql = GraphQlRequest::charge(&request.payment_method_nonce, amount.clone());
        let data: ChargeData = self.execute("chargePaymentMethod", &graphql).await?;

        let transaction = data
            .charge_payment_method
            .map(|payload| payload.transaction)
            .ok_or_else(|| ProviderError::invalid_response("Braintree returned no transaction"))?;

        if transaction.status.is_declined() {
            tracing::warn!(
                transaction_id = %transaction.id,
                status = %transaction.status,
                "Sale declined"
            );
            return Err(ProviderError::declined(
                transaction.status,
                Some(transaction.id),
                format!("Transaction {}", transaction.status.as_str().to_lowercase().replace('_', " ")),
            ));
        }

        tracing::info!(
            transaction_id = %transaction.id,
            status = %transaction.status,
            amount = %amount,
            "Sale submitted"
        );

        let (amount, currency) = match transaction.amount {
            Some(money) => (money.value, money.currency_code),
            None => (amount, None),
        };

        Ok(SaleResult {
            transaction_id: transaction.id,
            status: transaction.status,
            amount,
            currency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use crate::adapters::test_support::spawn_fake_upstream;
    use crate::domain::payment::{MinorUnits, ProviderErrorCode, TransactionStatus};

    type Log = Arc<Mutex<Vec<(Option<String>, Value)>>>;

    /// Fake GraphQL endpoint speaking the sandbox's test nonces.
    async fn fake_graphql(State(log): State<Log>, headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        let version = headers
            .get("Braintree-Version")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let n = {
            let mut log = log.lock().unwrap();
            log.push((version, body.clone()));
            log.len()
        };

        if headers.get("Authorization").is_none() {
            return (StatusCode::UNAUTHORIZED, Json(json!({"error": "unauthorized"})));
        }

        let query = body["query"].as_str().unwrap_or_default();
        if query.contains("createClientToken") {
            return (
                StatusCode::OK,
                Json(json!({"data": {"createClientToken": {"clientToken": format!("token_{}", n)}}})),
            );
        }

        let input = &body["variables"]["input"];
        let amount = input["transaction"]["amount"].as_str().unwrap_or_default().to_string();
        match input["paymentMethodId"].as_str().unwrap_or_default() {
            "fake-valid-nonce" => (
                StatusCode::OK,
                Json(json!({"data": {"chargePaymentMethod": {"transaction": {
                    "id": format!("txn_{}", n),
                    "status": "SUBMITTED_FOR_SETTLEMENT",
                    "amount": {"value": amount, "currencyCode": "USD"}
                }}}})),
            ),
            "fake-gateway-rejected-nonce" => (
                StatusCode::OK,
                Json(json!({"data": {"chargePaymentMethod": {"transaction": {
                    "id": format!("txn_{}", n),
                    "status": "GATEWAY_REJECTED",
                    "amount": {"value": amount, "currencyCode": "USD"}
                }}}})),
            ),
            "fake-processor-declined-visa-nonce" => (
                StatusCode::OK,
                Json(json!({"data": null, "errors": [{
                    "message": "Do Not Honor",
                    "extensions": {"legacyCode": "2000", "errorClass": "VALIDATION"}
                }]})),
            ),
            _ => (
                StatusCode::OK,
                Json(json!({"data": null, "errors": [{
                    "message": "Unknown or expired payment_method_nonce.",
                    "extensions": {"legacyCode": "91565", "errorClass": "VALIDATION"}
                }]})),
            ),
        }
    }

    async fn adapter_with_fake() -> (BraintreeGatewayAdapter, Log) {
        let log: Log = Arc::default();
        let router = Router::new()
            .route("/graphql", post(fake_graphql))
            .with_state(log.clone());
        let base_url = spawn_fake_upstream(router).await;
        let config = BraintreeConfig::new(BraintreeEnvironment::Sandbox, "merchant", "public", "private")
            .with_api_url(format!("{}/graphql", base_url));
        (BraintreeGatewayAdapter::new(config), log)
    }

    fn sale(amount: u64, nonce: &str) -> SaleRequest {
        SaleRequest {
            amount: MinorUnits::new(amount),
            payment_method_nonce: nonce.to_string(),
        }
    }

    #[test]
    fn config_selects_endpoint_by_environment() {
        let sandbox = BraintreeConfig::new(BraintreeEnvironment::Sandbox, "m", "pub", "priv");
        assert_eq!(sandbox.api_url, SANDBOX_URL);

        let production = BraintreeConfig::new(BraintreeEnvironment::Production, "m", "pub", "priv");
        assert_eq!(production.api_url, PRODUCTION_URL);
        assert_eq!(production.merchant_id(), "m");
    }

    #[tokio::test]
    async fn generate_client_token_without_customer() {
        let (adapter, log) = adapter_with_fake().await;

        let token = adapter.generate_client_token(None).await.unwrap();

        assert!(!token.as_str().is_empty());
        let calls = log.lock().unwrap().clone();
        assert_eq!(calls[0].0.as_deref(), Some(BRAINTREE_VERSION));
        assert!(calls[0].1["variables"]["input"]["clientToken"]
            .get("customerId")
            .is_none());
    }

    #[tokio::test]
    async fn generate_client_token_for_customer() {
        let (adapter, log) = adapter_with_fake().await;

        adapter.generate_client_token(Some("cust_42")).await.unwrap();

        let calls = log.lock().unwrap().clone();
        assert_eq!(
            calls[0].1["variables"]["input"]["clientToken"]["customerId"],
            "cust_42"
        );
    }

    #[tokio::test]
    async fn submit_sale_formats_amount_and_settles() {
        let (adapter, log) = adapter_with_fake().await;

        let result = adapter.submit_sale(sale(1099, "fake-valid-nonce")).await.unwrap();

        assert!(result.status.is_settling_or_settled());
        assert_eq!(result.amount, "10.99");
        assert_eq!(result.currency.as_deref(), Some("USD"));
        let calls = log.lock().unwrap().clone();
        assert_eq!(calls[0].1["variables"]["input"]["transaction"]["amount"], "10.99");
    }

    #[tokio::test]
    async fn identical_sales_create_distinct_transactions() {
        let (adapter, _log) = adapter_with_fake().await;

        let first = adapter.submit_sale(sale(500, "fake-valid-nonce")).await.unwrap();
        let second = adapter.submit_sale(sale(500, "fake-valid-nonce")).await.unwrap();

        assert_ne!(first.transaction_id, second.transaction_id);
    }

    #[tokio::test]
    async fn rejected_transaction_is_declined_with_result() {
        let (adapter, _log) = adapter_with_fake().await;

        let err = adapter
            .submit_sale(sale(1000, "fake-gateway-rejected-nonce"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ProviderErrorCode::Declined);
        assert_eq!(err.transaction_status, Some(TransactionStatus::GatewayRejected));
        assert!(err.transaction_id.is_some());
    }

    #[tokio::test]
    async fn processor_decline_error_is_declined() {
        let (adapter, _log) = adapter_with_fake().await;

        let err = adapter
            .submit_sale(sale(1000, "fake-processor-declined-visa-nonce"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ProviderErrorCode::Declined);
        assert_eq!(err.message, "Do Not Honor");
    }

    #[tokio::test]
    async fn invalid_nonce_is_invalid_request() {
        let (adapter, _log) = adapter_with_fake().await;

        let err = adapter.submit_sale(sale(1000, "not-a-nonce")).await.unwrap_err();

        assert_eq!(err.code, ProviderErrorCode::InvalidRequest);
        assert_eq!(err.provider_code.as_deref(), Some("91565"));
    }

    #[tokio::test]
    async fn http_error_without_graphql_body_is_classified() {
        let router = Router::new().route(
            "/graphql",
            post(|| async { (StatusCode::UNAUTHORIZED, "Unauthorized") }),
        );
        let base_url = spawn_fake_upstream(router).await;
        let adapter = BraintreeGatewayAdapter::new(
            BraintreeConfig::new(BraintreeEnvironment::Sandbox, "m", "pub", "priv")
                .with_api_url(format!("{}/graphql", base_url)),
        );

        let err = adapter.generate_client_token(None).await.unwrap_err();

        assert_eq!(err.code, ProviderErrorCode::AuthenticationError);
    }

    #[tokio::test]
    async fn unreachable_braintree_is_a_network_error() {
        // Nothing listens on the discard port.
        let adapter = BraintreeGatewayAdapter::new(
            BraintreeConfig::new(BraintreeEnvironment::Sandbox, "m", "pub", "priv")
                .with_api_url("http://127.0.0.1:9/graphql"),
        );

        let err = adapter.generate_client_token(None).await.unwrap_err();

        assert_eq!(err.code, ProviderErrorCode::NetworkError);
        assert_eq!(err.message, "Could not reach Braintree");
        assert!(!err.message.contains("127.0.0.1"));
    }

    #[tokio::test]
    async fn malformed_success_body_hides_parser_detail() {
        let router = Router::new().route("/graphql", post(|| async { (StatusCode::OK, "<html>") }));
        let base_url = spawn_fake_upstream(router).await;
        let adapter = BraintreeGatewayAdapter::new(
            BraintreeConfig::new(BraintreeEnvironment::Sandbox, "m", "pub", "priv")
                .with_api_url(format!("{}/graphql", base_url)),
        );

        let err = adapter.generate_client_token(None).await.unwrap_err();

        assert_eq!(err.code, ProviderErrorCode::InvalidResponse);
        assert_eq!(err.message, "Braintree returned an unreadable response");
    }
}
