//! Integration tests for the relay HTTP endpoints.
//!
//! The full router (with middleware) runs in-process against mock providers:
//! 1. Card processor endpoints return client-side secrets only
//! 2. Gateway checkout reports settlement or fails with an `error` body
//! 3. Bad input is rejected with 400 before any provider call
//! 4. The user service relay passes status and body through

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use checkout_relay::adapters::http::relay::ROOT_MESSAGE;
use checkout_relay::adapters::http::{build_app, CheckoutSettings, RelayAppState};
use checkout_relay::adapters::{MockCardProcessor, MockPaymentGateway, MockUserService};
use checkout_relay::config::ServerConfig;
use checkout_relay::domain::payment::{ProviderError, RelayError};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestApp {
    router: Router,
    processor: MockCardProcessor,
    gateway: MockPaymentGateway,
}

impl TestApp {
    fn new() -> Self {
        Self::with_users(None)
    }

    fn with_users(users: Option<MockUserService>) -> Self {
        let processor = MockCardProcessor::new();
        let gateway = MockPaymentGateway::new();
        let mut state = RelayAppState::new(
            Arc::new(processor.clone()),
            Arc::new(gateway.clone()),
            CheckoutSettings::default(),
        );
        if let Some(users) = users {
            state = state.with_user_service(Arc::new(users));
        }
        Self {
            router: build_app(state, &ServerConfig::default()),
            processor,
            gateway,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, body)
    }

    async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn post_empty(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }
}

fn assert_error_body(body: &Value) {
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()), "{body}");
    assert!(body["code"].is_string(), "{body}");
}

// =============================================================================
// Card processor endpoints
// =============================================================================

#[tokio::test]
async fn root_reports_running() {
    let app = TestApp::new();

    let (status, body) = app.get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String(ROOT_MESSAGE.to_string()));
}

#[tokio::test]
async fn create_payment_intent_returns_distinct_secrets() {
    let app = TestApp::new();

    let (status_a, a) = app.post_json("/create-payment-intent", json!({})).await;
    let (status_b, b) = app.post_empty("/create-payment-intent").await;

    assert_eq!(status_a, StatusCode::OK);
    assert_eq!(status_b, StatusCode::OK);
    let secret_a = a["clientSecret"].as_str().unwrap();
    let secret_b = b["clientSecret"].as_str().unwrap();
    assert!(!secret_a.is_empty());
    assert_ne!(secret_a, secret_b);
}

#[tokio::test]
async fn create_payment_intent_ignores_client_amount() {
    let app = TestApp::new();

    app.post_json("/create-payment-intent", json!({"amount": 1, "currency": "eur"}))
        .await;

    let request = &app.processor.intent_requests()[0];
    assert_eq!(request.amount.value(), 1099);
    assert_eq!(request.currency.as_str(), "usd");
    assert_eq!(request.allowed_methods, vec!["card"]);
}

#[tokio::test]
async fn create_payment_intent_provider_failure_is_502() {
    let app = TestApp::new();
    app.processor
        .set_error(ProviderError::authentication("Invalid API Key provided"));

    let (status, body) = app.post_empty("/create-payment-intent").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_error_body(&body);
    assert_eq!(body["code"], "PROVIDER_ERROR");
}

#[tokio::test]
async fn payment_sheet_returns_exactly_three_keys() {
    let app = TestApp::new();

    let (status, body) = app.post_empty("/payment-sheet?totalPrice=500").await;

    assert_eq!(status, StatusCode::OK);
    let object = body.as_object().unwrap();
    assert_eq!(object.len(), 3);
    for key in ["paymentIntent", "ephemeralKey", "customer"] {
        assert!(!object[key].as_str().unwrap().is_empty(), "{key} empty");
    }
    assert_eq!(app.processor.intent_requests()[0].amount.value(), 500);
}

#[tokio::test]
async fn payment_sheet_rejects_bad_total_price() {
    let app = TestApp::new();

    for uri in [
        "/payment-sheet",
        "/payment-sheet?totalPrice=",
        "/payment-sheet?totalPrice=abc",
        "/payment-sheet?totalPrice=0",
        "/payment-sheet?totalPrice=-5",
        "/payment-sheet?totalPrice=12.5",
    ] {
        let (status, body) = app.post_empty(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_error_body(&body);
        assert_eq!(body["code"], "VALIDATION_FAILED");
    }

    assert!(app.processor.calls().is_empty());
}

// =============================================================================
// Gateway endpoints
// =============================================================================

#[tokio::test]
async fn generate_token_without_customer() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/generate/token").await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["clientToken"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn generate_token_for_customer() {
    let app = TestApp::new();

    let (status, _) = app.get("/api/generate/token?customerId=cust_12").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.gateway.calls()[0].args, vec!["cust_12"]);
}

#[tokio::test]
async fn checkout_with_valid_nonce_settles() {
    let app = TestApp::new();

    let (status, body) = app
        .post_json(
            "/api/checkout",
            json!({"payment_method_nonce": "fake-valid-nonce", "amount": 1000}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["transaction"]["status"], "SUBMITTED_FOR_SETTLEMENT");
    assert_eq!(body["transaction"]["amount"], "10.00");
}

#[tokio::test]
async fn checkout_with_declined_nonce_fails_with_error() {
    let app = TestApp::new();

    let (status, body) = app
        .post_json(
            "/api/checkout",
            json!({"payment_method_nonce": "fake-processor-declined-visa-nonce", "amount": 1000}),
        )
        .await;

    assert!(status.as_u16() >= 400);
    assert_error_body(&body);
    assert_eq!(body["code"], "PAYMENT_DECLINED");
}

#[tokio::test]
async fn checkout_with_unknown_nonce_is_502() {
    let app = TestApp::new();

    let (status, body) = app
        .post_json(
            "/api/checkout",
            json!({"payment_method_nonce": "not-a-nonce", "amount": 1000}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_error_body(&body);
    assert_eq!(body["code"], "PROVIDER_ERROR");
    assert!(app.gateway.sales().is_empty());
}

#[tokio::test]
async fn identical_checkouts_create_distinct_transactions() {
    let app = TestApp::new();
    let payload = json!({"payment_method_nonce": "fake-valid-nonce", "amount": 2500});

    let (_, first) = app.post_json("/api/checkout", payload.clone()).await;
    let (_, second) = app.post_json("/api/checkout", payload).await;

    assert_ne!(first["transaction"]["id"], second["transaction"]["id"]);
    assert_eq!(app.gateway.sales().len(), 2);
}

#[tokio::test]
async fn checkout_rejects_malformed_input() {
    let app = TestApp::new();

    for payload in [
        json!({}),
        json!({"payment_method_nonce": "fake-valid-nonce"}),
        json!({"amount": 1000}),
        json!({"payment_method_nonce": "fake-valid-nonce", "amount": -1}),
        json!({"payment_method_nonce": "fake-valid-nonce", "amount": 0}),
        json!({"payment_method_nonce": "", "amount": 1000}),
    ] {
        let (status, body) = app.post_json("/api/checkout", payload.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{payload}");
        assert_error_body(&body);
    }

    let (status, _) = app
        .send(
            Request::builder()
                .method("POST")
                .uri("/api/checkout")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!app.gateway.was_called("submit_sale"));
}

// =============================================================================
// User service relay
// =============================================================================

#[tokio::test]
async fn login_without_user_service_is_503() {
    let app = TestApp::new();

    let (status, body) = app
        .post_json("/api/login", json!({"email": "a@example.com", "password": "pw"}))
        .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "USER_SERVICE_UNAVAILABLE");
}

#[tokio::test]
async fn login_relays_user_service_reply() {
    let users = MockUserService::new().with_reply(401, json!({"error": "Invalid credentials"}));
    let app = TestApp::with_users(Some(users.clone()));

    let (status, body) = app
        .post_json("/api/login", json!({"email": "a@example.com", "password": "pw"}))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"error": "Invalid credentials"}));
    assert_eq!(users.received()[0].1["email"], "a@example.com");
}

#[tokio::test]
async fn register_accepts_trailing_slash() {
    let users = MockUserService::new().with_reply(201, json!({"id": "u_1"}));
    let app = TestApp::with_users(Some(users.clone()));

    let (plain, _) = app.post_json("/api/register", json!({"email": "a@example.com"})).await;
    let (slashed, _) = app.post_json("/api/register/", json!({"email": "b@example.com"})).await;

    assert_eq!(plain, StatusCode::CREATED);
    assert_eq!(slashed, StatusCode::CREATED);
    let operations: Vec<&str> = users.received().iter().map(|(op, _)| *op).collect();
    assert_eq!(operations, vec!["register", "register"]);
}

#[tokio::test]
async fn unreachable_user_service_is_502() {
    let users = MockUserService::new().with_error(RelayError::Provider(ProviderError::network(
        "User service is unreachable",
    )));
    let app = TestApp::with_users(Some(users));

    let (status, body) = app.post_json("/api/login", json!({})).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_error_body(&body);
}
