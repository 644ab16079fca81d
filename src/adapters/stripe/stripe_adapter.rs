//! Stripe card processor adapter.
//!
//! Implements the `CardProcessor` trait against the Stripe REST API.
//! Requests are form-encoded, authenticated with the secret key, and pinned
//! to the configured API version through the `Stripe-Version` header.
//!
//! # Configuration
//!
//! ```ignore
//! let config = StripeConfig::new(secret_key, "2020-08-27");
//! let adapter = StripeCardAdapter::new(config);
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use crate::config::PaymentConfig;
use crate::domain::payment::ProviderError;
use crate::ports::{CardProcessor, Customer, EphemeralKey, PaymentIntent, PaymentIntentRequest};

use super::api_types::{
    StripeCustomer, StripeEphemeralKey, StripeErrorEnvelope, StripePaymentIntent,
};

const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// API version sent with every request.
    api_version: String,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,
}

impl StripeConfig {
    /// Create a new Stripe configuration.
    pub fn new(api_key: impl Into<String>, api_version: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            api_version: api_version.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Build from the application's payment settings.
    pub fn from_settings(settings: &PaymentConfig) -> Self {
        let config = Self::new(
            settings.stripe_secret_key.clone(),
            settings.stripe_api_version.clone(),
        );
        match &settings.stripe_api_base_url {
            Some(url) => config.with_base_url(url.clone()),
            None => config,
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }
}

/// Stripe card processor adapter.
pub struct StripeCardAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripeCardAdapter {
    /// Create a new Stripe adapter with the given configuration.
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// POST a form to `path` and decode the JSON reply.
    async fn post_form<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
        params: &[(String, String)],
        stripe_version: &str,
    ) -> Result<T, ProviderError> {
        let url = format!("{}{}", self.config.api_base_url, path);

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .header("Stripe-Version", stripe_version)
            .form(params)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(operation, error = %e, "Stripe request failed");
                ProviderError::network("Could not reach Stripe")
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let err = match serde_json::from_str::<StripeErrorEnvelope>(&error_text) {
                Ok(envelope) => envelope.error.into_provider_error(status.as_u16()),
                Err(_) => ProviderError::from_status(
                    status.as_u16(),
                    format!("Stripe API error (HTTP {})", status.as_u16()),
                ),
            };
            tracing::error!(
                operation,
                status = status.as_u16(),
                code = %err.code,
                provider_code = ?err.provider_code,
                "Stripe {} failed",
                operation
            );
            tracing::debug!(operation, body = %error_text, "Stripe error body");
            return Err(err);
        }

        response.json::<T>().await.map_err(|e| {
            tracing::error!(operation, error = %e, "Failed to parse Stripe response");
            ProviderError::invalid_response("Stripe returned an unreadable response")
        })
    }
}

#[async_trait]
impl CardProcessor for StripeCardAdapter {
    async fn create_payment_intent(
        &self,
        request: PaymentIntentRequest,
    ) -> Result<PaymentIntent, ProviderError> {
        let mut params = vec![
            ("amount".to_string(), request.amount.to_string()),
            ("currency".to_string(), request.currency.to_string()),
        ];

        for (i, method) in request.allowed_methods.iter().enumerate() {
            params.push((format!("payment_method_types[{}]", i), method.clone()));
        }

        if let Some(customer_id) = &request.customer_id {
            params.push(("customer".to_string(), customer_id.clone()));
        }

        let intent: StripePaymentIntent = self
            .post_form(
                "create_payment_intent",
                "/v1/payment_intents",
                &params,
                &self.config.api_version,
            )
            .await?;

        let client_secret = intent
            .client_secret
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                ProviderError::invalid_response("Stripe returned a payment intent without a client secret")
            })?;

        tracing::info!(
            payment_intent_id = %intent.id,
            amount = intent.amount,
            currency = %intent.currency,
            "Payment intent created"
        );

        Ok(PaymentIntent {
            id: intent.id,
            client_secret,
        })
    }

    async fn create_customer(&self) -> Result<Customer, ProviderError> {
        let customer: StripeCustomer = self
            .post_form(
                "create_customer",
                "/v1/customers",
                &[],
                &self.config.api_version,
            )
            .await?;

        tracing::info!(customer_id = %customer.id, "Customer created");

        Ok(Customer { id: customer.id })
    }

    async fn create_ephemeral_key(
        &self,
        customer_id: &str,
        api_version: &str,
    ) -> Result<EphemeralKey, ProviderError> {
        let params = [("customer".to_string(), customer_id.to_string())];

        // Ephemeral keys are pinned to the version the mobile SDK speaks.
        let key: StripeEphemeralKey = self
            .post_form("create_ephemeral_key", "/v1/ephemeral_keys", &params, api_version)
            .await?;

        Ok(EphemeralKey {
            id: key.id,
            secret: key.secret,
        })
    }
}
