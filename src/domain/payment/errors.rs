//! Relay error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Validation | 400 |
//! | Provider | 502 |
//! | UserServiceUnavailable | 503 |

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::transaction::TransactionStatus;

/// Error raised by a payment provider call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderError {
    /// Error code for categorization.
    pub code: ProviderErrorCode,

    /// Human-readable message.
    pub message: String,

    /// Provider's own error code (if available).
    pub provider_code: Option<String>,

    /// Transaction status when a sale was declined.
    pub transaction_status: Option<TransactionStatus>,

    /// Transaction ID when a sale was declined.
    pub transaction_id: Option<String>,

    /// Whether the operation can be retried.
    pub retryable: bool,
}

impl ProviderError {
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
            transaction_status: None,
            transaction_id: None,
            retryable: code.is_retryable(),
        }
    }

    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::NetworkError, message)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::AuthenticationError, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InvalidRequest, message)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::RateLimited, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InvalidResponse, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::ProviderError, message)
    }

    /// A sale the gateway refused, carrying its transaction result.
    pub fn declined(
        status: TransactionStatus,
        transaction_id: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        let mut err = Self::new(ProviderErrorCode::Declined, message);
        err.transaction_status = Some(status);
        err.transaction_id = transaction_id;
        err
    }

    /// Classify a non-success HTTP status from a provider.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let code = match status {
            401 | 403 => ProviderErrorCode::AuthenticationError,
            402 => ProviderErrorCode::Declined,
            400 | 404 | 409 | 422 => ProviderErrorCode::InvalidRequest,
            429 => ProviderErrorCode::RateLimited,
            _ => ProviderErrorCode::ProviderError,
        };
        Self::new(code, message)
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ProviderError {}

/// Provider error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// API credentials rejected.
    AuthenticationError,

    /// Provider rejected the request parameters.
    InvalidRequest,

    /// Payment declined.
    Declined,

    /// Rate limit exceeded.
    RateLimited,

    /// Provider replied with something we could not parse.
    InvalidResponse,

    /// Any other provider-side failure.
    ProviderError,
}

impl ProviderErrorCode {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ProviderErrorCode::NetworkError | ProviderErrorCode::RateLimited
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderErrorCode::NetworkError => "network_error",
            ProviderErrorCode::AuthenticationError => "authentication_error",
            ProviderErrorCode::InvalidRequest => "invalid_request",
            ProviderErrorCode::Declined => "declined",
            ProviderErrorCode::RateLimited => "rate_limited",
            ProviderErrorCode::InvalidResponse => "invalid_response",
            ProviderErrorCode::ProviderError => "provider_error",
        }
    }
}

impl std::fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by relay operations.
#[derive(Debug, Clone, Error)]
pub enum RelayError {
    /// Absent or malformed client input.
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// Upstream rejection, network failure, or declined transaction.
    #[error("Payment provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The user service is not configured or could not be reached.
    #[error("User service unavailable: {0}")]
    UserServiceUnavailable(String),
}

impl RelayError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        RelayError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn user_service_unavailable(message: impl Into<String>) -> Self {
        RelayError::UserServiceUnavailable(message.into())
    }

    /// Stable code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            RelayError::Validation { .. } => "VALIDATION_FAILED",
            RelayError::Provider(err) if err.code == ProviderErrorCode::Declined => {
                "PAYMENT_DECLINED"
            }
            RelayError::Provider(_) => "PROVIDER_ERROR",
            RelayError::UserServiceUnavailable(_) => "USER_SERVICE_UNAVAILABLE",
        }
    }

    /// Message safe to show to API clients.
    pub fn message(&self) -> String {
        match self {
            RelayError::Validation { field, message } => format!("Invalid {}: {}", field, message),
            RelayError::Provider(err) => err.message.clone(),
            RelayError::UserServiceUnavailable(msg) => msg.clone(),
        }
    }
}
