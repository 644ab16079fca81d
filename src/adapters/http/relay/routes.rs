//! Axum router configuration for relay endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    checkout, create_payment_intent, generate_token, login, payment_sheet, register, root,
    RelayAppState,
};

/// Card processor routes, mounted at the root for the mobile client.
///
/// # Routes
/// - `GET /` - Liveness text
/// - `POST /create-payment-intent` - Fixed-price payment intent
/// - `POST /payment-sheet` - Customer, ephemeral key and payment intent
pub fn card_routes() -> Router<RelayAppState> {
    Router::new()
        .route("/", get(root))
        .route("/create-payment-intent", post(create_payment_intent))
        .route("/payment-sheet", post(payment_sheet))
}

/// Gateway and user routes, mounted under `/api`.
///
/// # Routes
/// - `GET /generate/token` - Gateway client token
/// - `POST /checkout` - Gateway sale
/// - `POST /login` - Forwarded to the user service
/// - `POST /register` (and `/register/`) - Forwarded to the user service
pub fn api_routes() -> Router<RelayAppState> {
    Router::new()
        .route("/generate/token", get(generate_token))
        .route("/checkout", post(checkout))
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/register/", post(register))
}

/// Complete relay router.
///
/// # Example
///
/// ```ignore
/// let app = relay_router().with_state(state);
/// ```
pub fn relay_router() -> Router<RelayAppState> {
    card_routes().nest("/api", api_routes())
}
