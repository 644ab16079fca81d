//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the relay to external systems:
//! - `stripe` - Card processor (payment intents, customers, ephemeral keys)
//! - `braintree` - Payment gateway (client tokens, sales)
//! - `user` - External user service (login, registration)
//! - `http` - Axum router exposing the relay endpoints

pub mod braintree;
pub mod http;
pub mod stripe;
pub mod user;

#[cfg(test)]
mod test_support;

pub use braintree::{BraintreeConfig, BraintreeGatewayAdapter, MockPaymentGateway};
pub use stripe::{MockCardProcessor, StripeCardAdapter, StripeConfig};
pub use user::{HttpUserService, MockUserService};
