//! HTTP adapter for the payment relay.
//!
//! - `GET /` - Liveness text
//! - `POST /create-payment-intent` - Fixed-price card payment intent
//! - `POST /payment-sheet` - Mobile payment sheet secrets
//! - `GET /api/generate/token` - Gateway client token
//! - `POST /api/checkout` - Gateway sale
//! - `POST /api/login`, `POST /api/register` - User service relay

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{CheckoutSettings, RelayApiError, RelayAppState, ROOT_MESSAGE};
pub use routes::relay_router;
