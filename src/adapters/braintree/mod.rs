//! Braintree payment gateway adapter.
//!
//! Implements the `PaymentGateway` port over the Braintree GraphQL API:
//! - Client tokens for the drop-in UI, optionally bound to a customer
//! - Sales that are submitted for settlement immediately
//!
//! # Configuration
//!
//! - `CHECKOUT_RELAY__PAYMENT__BRAINTREE_ENVIRONMENT`: `sandbox` or `production`
//! - `CHECKOUT_RELAY__PAYMENT__BRAINTREE_MERCHANT_ID`
//! - `CHECKOUT_RELAY__PAYMENT__BRAINTREE_PUBLIC_KEY`
//! - `CHECKOUT_RELAY__PAYMENT__BRAINTREE_PRIVATE_KEY`

mod braintree_adapter;
mod graphql;
mod mock_payment_gateway;

pub use braintree_adapter::{BraintreeConfig, BraintreeGatewayAdapter};
pub use mock_payment_gateway::MockPaymentGateway;
