//! Fixed-price checkout configuration
//!
//! `/create-payment-intent` never reads an amount from the client; it charges
//! whatever is configured here.

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::payment::{CurrencyCode, MinorUnits};

/// Checkout defaults used by the fixed-price payment intent endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutConfig {
    /// Amount charged, in the currency's smallest unit
    #[serde(default = "default_fixed_amount")]
    pub fixed_amount: u64,

    /// ISO 4217 currency code
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Allowed payment method types (comma-separated)
    #[serde(default = "default_payment_method_types")]
    pub payment_method_types: String,
}

impl CheckoutConfig {
    /// Fixed amount as a typed value
    pub fn amount(&self) -> MinorUnits {
        MinorUnits::new(self.fixed_amount)
    }

    /// Parsed currency code
    pub fn currency_code(&self) -> Result<CurrencyCode, ValidationError> {
        CurrencyCode::parse(&self.currency)
            .map_err(|_| ValidationError::InvalidCurrency(self.currency.clone()))
    }

    /// Payment method types as a de-duplicated list, in configured order
    pub fn payment_method_types_list(&self) -> Vec<String> {
        let mut methods: Vec<String> = Vec::new();
        for method in self.payment_method_types.split(',').map(str::trim) {
            if !method.is_empty() && !methods.iter().any(|m| m == method) {
                methods.push(method.to_string());
            }
        }
        methods
    }

    /// Validate checkout configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.fixed_amount == 0 {
            return Err(ValidationError::InvalidCheckoutAmount);
        }
        self.currency_code()?;
        if self.payment_method_types_list().is_empty() {
            return Err(ValidationError::NoPaymentMethodTypes);
        }
        Ok(())
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            fixed_amount: default_fixed_amount(),
            currency: default_currency(),
            payment_method_types: default_payment_method_types(),
        }
    }
}

fn default_fixed_amount() -> u64 {
    1099
}

fn default_currency() -> String {
    "usd".to_string()
}

fn default_payment_method_types() -> String {
    "card".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fixed_price_product() {
        let config = CheckoutConfig::default();
        assert_eq!(config.amount().value(), 1099);
        assert_eq!(config.currency_code().unwrap().as_str(), "usd");
        assert_eq!(config.payment_method_types_list(), vec!["card".to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_payment_method_types_are_deduplicated() {
        let config = CheckoutConfig {
            payment_method_types: "card, card,us_bank_account,".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.payment_method_types_list(),
            vec!["card".to_string(), "us_bank_account".to_string()]
        );
    }

    #[test]
    fn test_validation_rejects_zero_amount() {
        let config = CheckoutConfig {
            fixed_amount: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidCheckoutAmount)
        ));
    }

    #[test]
    fn test_validation_rejects_bad_currency() {
        let config = CheckoutConfig {
            currency: "dollars".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidCurrency(_))
        ));
    }

    #[test]
    fn test_validation_requires_a_method_type() {
        let config = CheckoutConfig {
            payment_method_types: " , ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
