//! Payment configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Stripe card processor and Braintree gateway)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret API key
    pub stripe_secret_key: String,

    /// Stripe API version pinned on every request and on ephemeral keys
    #[serde(default = "default_stripe_api_version")]
    pub stripe_api_version: String,

    /// Override for the Stripe API base URL
    pub stripe_api_base_url: Option<String>,

    /// Braintree environment
    #[serde(default)]
    pub braintree_environment: BraintreeEnvironment,

    /// Braintree merchant ID
    pub braintree_merchant_id: String,

    /// Braintree public key
    pub braintree_public_key: String,

    /// Braintree private key
    pub braintree_private_key: String,

    /// Override for the Braintree GraphQL endpoint
    pub braintree_api_url: Option<String>,
}

/// Braintree environment selector
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BraintreeEnvironment {
    #[default]
    Sandbox,
    Production,
}

impl PaymentConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.stripe_secret_key.starts_with("sk_test_")
    }

    /// Check if using Stripe live mode
    pub fn is_live_mode(&self) -> bool {
        self.stripe_secret_key.starts_with("sk_live_")
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.stripe_secret_key.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_SECRET_KEY"));
        }
        if !self.stripe_secret_key.starts_with("sk_") {
            return Err(ValidationError::InvalidStripeKey);
        }
        if self.stripe_api_version.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_API_VERSION"));
        }
        if self.braintree_merchant_id.is_empty() {
            return Err(ValidationError::MissingRequired("BRAINTREE_MERCHANT_ID"));
        }
        if self.braintree_public_key.is_empty() {
            return Err(ValidationError::MissingRequired("BRAINTREE_PUBLIC_KEY"));
        }
        if self.braintree_private_key.is_empty() {
            return Err(ValidationError::MissingRequired("BRAINTREE_PRIVATE_KEY"));
        }
        check_url(self.stripe_api_base_url.as_deref(), "STRIPE_API_BASE_URL")?;
        check_url(self.braintree_api_url.as_deref(), "BRAINTREE_API_URL")?;
        Ok(())
    }
}

pub(super) fn check_url(url: Option<&str>, name: &'static str) -> Result<(), ValidationError> {
    match url {
        Some(url) if !(url.starts_with("http://") || url.starts_with("https://")) => {
            Err(ValidationError::InvalidUrl(name))
        }
        _ => Ok(()),
    }
}

fn default_stripe_api_version() -> String {
    "2020-08-27".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> PaymentConfig {
        PaymentConfig {
            stripe_secret_key: "sk_test_abcd1234".to_string(),
            stripe_api_version: default_stripe_api_version(),
            braintree_merchant_id: "merchant".to_string(),
            braintree_public_key: "public".to_string(),
            braintree_private_key: "private".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_is_test_mode() {
        let config = valid_config();
        assert!(config.is_test_mode());
        assert!(!config.is_live_mode());
    }

    #[test]
    fn test_is_live_mode() {
        let config = PaymentConfig {
            stripe_secret_key: "sk_live_xxx".to_string(),
            ..valid_config()
        };
        assert!(config.is_live_mode());
        assert!(!config.is_test_mode());
    }

    #[test]
    fn test_validation_missing_secret_key() {
        let config = PaymentConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired("STRIPE_SECRET_KEY"))
        ));
    }

    #[test]
    fn test_validation_invalid_key_prefix() {
        let config = PaymentConfig {
            stripe_secret_key: "pk_test_xxx".to_string(), // publishable key
            ..valid_config()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidStripeKey)
        ));
    }

    #[test]
    fn test_validation_missing_braintree_credentials() {
        let config = PaymentConfig {
            braintree_private_key: String::new(),
            ..valid_config()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired("BRAINTREE_PRIVATE_KEY"))
        ));
    }

    #[test]
    fn test_validation_rejects_bad_override_url() {
        let config = PaymentConfig {
            braintree_api_url: Some("payments.example.com/graphql".to_string()),
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        let config = PaymentConfig {
            stripe_api_base_url: Some("http://127.0.0.1:12111".to_string()),
            ..valid_config()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.braintree_environment, BraintreeEnvironment::Sandbox);
    }
}
