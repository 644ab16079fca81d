//! User service configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::payment::check_url;

/// Location of the external user service that owns login and registration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserServiceConfig {
    /// Base URL; `/login` and `/register` are appended. Unset disables the routes.
    pub base_url: Option<String>,
}

impl UserServiceConfig {
    /// Whether login/registration can be relayed
    pub fn is_configured(&self) -> bool {
        self.base_url.as_deref().is_some_and(|url| !url.is_empty())
    }

    /// Validate user service configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_url(self.base_url.as_deref(), "USERS_BASE_URL")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_by_default() {
        let config = UserServiceConfig::default();
        assert!(!config.is_configured());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_base_url_validation() {
        let config = UserServiceConfig {
            base_url: Some("users.internal:4000".to_string()),
        };
        assert!(config.validate().is_err());

        let config = UserServiceConfig {
            base_url: Some("http://users.internal:4000".to_string()),
        };
        assert!(config.is_configured());
        assert!(config.validate().is_ok());
    }
}
