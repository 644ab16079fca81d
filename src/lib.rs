//! Checkout Relay - HTTP relay between checkout clients and payment providers.
//!
//! Mobile and web clients never hold provider secrets. They call this
//! service, which talks to the card processor (Stripe) and the payment
//! gateway (Braintree) on their behalf and returns only the client-side
//! credentials each SDK needs.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
