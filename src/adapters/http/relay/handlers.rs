//! HTTP handlers for relay endpoints.
//!
//! These handlers connect Axum routes to the relay command/query handlers.
//! Extractor rejections are turned into validation errors so every failure
//! shares one `{error, code}` body.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::Value;

use crate::application::handlers::relay::{
    CreatePaymentIntentCommand, CreatePaymentIntentHandler, CreatePaymentSheetCommand,
    CreatePaymentSheetHandler, GenerateClientTokenHandler, GenerateClientTokenQuery,
    SubmitSaleCommand, SubmitSaleHandler,
};
use crate::config::{AppConfig, ValidationError};
use crate::domain::payment::{CurrencyCode, MinorUnits, RelayError};
use crate::ports::{CardProcessor, PaymentGateway, UserRelayResponse, UserService};

use super::dto::{
    CheckoutRequest, CheckoutResponse, ClientSecretResponse, ClientTokenResponse, ErrorResponse,
    GenerateTokenQuery, PaymentSheetQuery, PaymentSheetResponse,
};

pub const ROOT_MESSAGE: &str = "stripe/braintree payment server running";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Checkout values resolved from configuration once at startup.
#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    pub fixed_amount: MinorUnits,
    pub currency: CurrencyCode,
    pub payment_method_types: Vec<String>,

    /// API version the card processor's mobile SDK expects.
    pub api_version: String,
}

impl CheckoutSettings {
    pub fn from_config(config: &AppConfig) -> Result<Self, ValidationError> {
        Ok(Self {
            fixed_amount: config.checkout.amount(),
            currency: config.checkout.currency_code()?,
            payment_method_types: config.checkout.payment_method_types_list(),
            api_version: config.payment.stripe_api_version.clone(),
        })
    }
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            fixed_amount: MinorUnits::new(1099),
            currency: CurrencyCode::usd(),
            payment_method_types: vec!["card".to_string()],
            api_version: "2020-08-27".to_string(),
        }
    }
}

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct RelayAppState {
    pub card_processor: Arc<dyn CardProcessor>,
    pub payment_gateway: Arc<dyn PaymentGateway>,

    /// `None` when no user service is configured.
    pub user_service: Option<Arc<dyn UserService>>,

    pub checkout: CheckoutSettings,
}

impl RelayAppState {
    pub fn new(
        card_processor: Arc<dyn CardProcessor>,
        payment_gateway: Arc<dyn PaymentGateway>,
        checkout: CheckoutSettings,
    ) -> Self {
        Self {
            card_processor,
            payment_gateway,
            user_service: None,
            checkout,
        }
    }

    pub fn with_user_service(mut self, user_service: Arc<dyn UserService>) -> Self {
        self.user_service = Some(user_service);
        self
    }

    pub fn create_payment_intent_handler(&self) -> CreatePaymentIntentHandler {
        CreatePaymentIntentHandler::new(self.card_processor.clone())
    }

    pub fn payment_sheet_handler(&self) -> CreatePaymentSheetHandler {
        CreatePaymentSheetHandler::new(self.card_processor.clone())
    }

    pub fn client_token_handler(&self) -> GenerateClientTokenHandler {
        GenerateClientTokenHandler::new(self.payment_gateway.clone())
    }

    pub fn submit_sale_handler(&self) -> SubmitSaleHandler {
        SubmitSaleHandler::new(self.payment_gateway.clone())
    }

    fn user_service(&self) -> Result<&Arc<dyn UserService>, RelayError> {
        self.user_service
            .as_ref()
            .ok_or_else(|| RelayError::user_service_unavailable("User service is not configured"))
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Card processor endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// GET / - Liveness text
pub async fn root() -> &'static str {
    ROOT_MESSAGE
}

/// POST /create-payment-intent - Fixed-price intent; the request body is ignored
pub async fn create_payment_intent(
    State(state): State<RelayAppState>,
) -> Result<impl IntoResponse, RelayApiError> {
    let handler = state.create_payment_intent_handler();
    let cmd = CreatePaymentIntentCommand {
        amount: state.checkout.fixed_amount,
        currency: state.checkout.currency.clone(),
        allowed_methods: state.checkout.payment_method_types.clone(),
    };

    let result = handler.handle(cmd).await?;

    Ok(Json(ClientSecretResponse {
        client_secret: result.client_secret,
    }))
}

/// POST /payment-sheet?totalPrice=<minor units> - Customer, ephemeral key and intent
pub async fn payment_sheet(
    State(state): State<RelayAppState>,
    query: Result<Query<PaymentSheetQuery>, QueryRejection>,
) -> Result<impl IntoResponse, RelayApiError> {
    let Query(query) =
        query.map_err(|rejection| RelayError::validation("query", rejection.body_text()))?;
    let raw = query
        .total_price
        .ok_or_else(|| RelayError::validation("totalPrice", "is required"))?;
    let total_price = MinorUnits::parse_positive(&raw, "totalPrice")?;

    let handler = state.payment_sheet_handler();
    let cmd = CreatePaymentSheetCommand {
        total_price,
        currency: state.checkout.currency.clone(),
        api_version: state.checkout.api_version.clone(),
    };

    let session = handler.handle(cmd).await?;

    Ok(Json(PaymentSheetResponse::from(session)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Gateway endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/generate/token - Client token, optionally for `customerId`
pub async fn generate_token(
    State(state): State<RelayAppState>,
    query: Result<Query<GenerateTokenQuery>, QueryRejection>,
) -> Result<impl IntoResponse, RelayApiError> {
    let Query(query) =
        query.map_err(|rejection| RelayError::validation("query", rejection.body_text()))?;

    let handler = state.client_token_handler();
    let token = handler
        .handle(GenerateClientTokenQuery {
            customer_id: query.customer_id,
        })
        .await?;

    Ok(Json(ClientTokenResponse {
        client_token: token.0,
    }))
}

/// POST /api/checkout - Charge a nonce and submit for settlement
pub async fn checkout(
    State(state): State<RelayAppState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<impl IntoResponse, RelayApiError> {
    let Json(request) =
        payload.map_err(|rejection| RelayError::validation("body", rejection.body_text()))?;

    let handler = state.submit_sale_handler();
    let cmd = SubmitSaleCommand {
        amount: MinorUnits::new(request.amount),
        payment_method_nonce: request.payment_method_nonce,
    };

    let result = handler.handle(cmd).await?;

    Ok(Json(CheckoutResponse::from(result)))
}

// ════════════════════════════════════════════════════════════════════════════════
// User service relay
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/login - Forwarded to the user service
pub async fn login(
    State(state): State<RelayAppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, RelayApiError> {
    let Json(body) =
        payload.map_err(|rejection| RelayError::validation("body", rejection.body_text()))?;

    let response = state.user_service()?.login(body).await?;

    Ok(relayed(response))
}

/// POST /api/register - Forwarded to the user service
pub async fn register(
    State(state): State<RelayAppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, RelayApiError> {
    let Json(body) =
        payload.map_err(|rejection| RelayError::validation("body", rejection.body_text()))?;

    let response = state.user_service()?.register(body).await?;

    Ok(relayed(response))
}

fn relayed(response: UserRelayResponse) -> impl IntoResponse {
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::BAD_GATEWAY);
    (status, Json(response.body))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error wrapper for relay errors.
#[derive(Debug)]
pub struct RelayApiError(pub RelayError);

impl RelayApiError {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            RelayError::Validation { .. } => StatusCode::BAD_REQUEST,
            RelayError::Provider(_) => StatusCode::BAD_GATEWAY,
            RelayError::UserServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<RelayError> for RelayApiError {
    fn from(err: RelayError) -> Self {
        Self(err)
    }
}

impl IntoResponse for RelayApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();

        match &self.0 {
            RelayError::Provider(err) => tracing::warn!(
                code = %err.code,
                provider_code = ?err.provider_code,
                transaction_id = ?err.transaction_id,
                "Provider call failed: {}",
                err.message
            ),
            other => tracing::debug!(code = other.code(), "Request rejected: {}", other),
        }

        let body = ErrorResponse::new(self.0.code(), self.0.message());
        (status, Json(body)).into_response()
    }
}
