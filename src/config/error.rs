//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid host address: {0}")]
    InvalidHost(String),

    #[error("Invalid Stripe API key format")]
    InvalidStripeKey,

    #[error("Invalid URL for {0}")]
    InvalidUrl(&'static str),

    #[error("Checkout amount must be greater than zero")]
    InvalidCheckoutAmount,

    #[error("Invalid checkout currency: {0}")]
    InvalidCurrency(String),

    #[error("At least one payment method type is required")]
    NoPaymentMethodTypes,
}
