//! Stripe card processor adapter.
//!
//! Implements the `CardProcessor` port for Stripe, covering:
//! - Payment intents (fixed-price and per-customer)
//! - Customers
//! - Ephemeral keys for the mobile payment sheet
//!
//! # Security
//!
//! - The secret key is held in a `secrecy::SecretString`
//! - Stripe error bodies are logged at debug level only; callers receive the
//!   parsed message
//!
//! # Configuration
//!
//! - `CHECKOUT_RELAY__PAYMENT__STRIPE_SECRET_KEY`: Stripe secret API key
//! - `CHECKOUT_RELAY__PAYMENT__STRIPE_API_VERSION`: pinned API version

mod api_types;
mod mock_card_processor;
mod stripe_adapter;

pub use api_types::{
    StripeApiError, StripeCustomer, StripeEphemeralKey, StripeErrorEnvelope, StripePaymentIntent,
};
pub use mock_card_processor::{MethodCall, MockCardProcessor};
pub use stripe_adapter::{StripeCardAdapter, StripeConfig};
