//! Value objects shared by the relay operations.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::RelayError;

/// An amount in the currency's smallest unit (cents for USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinorUnits(u64);

impl MinorUnits {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Returns the amount if it is strictly positive.
    pub fn positive(value: u64, field: &str) -> Result<Self, RelayError> {
        if value == 0 {
            return Err(RelayError::validation(field, "must be greater than zero"));
        }
        Ok(Self(value))
    }

    /// Parses a client-supplied integer string (e.g. a query parameter).
    pub fn parse_positive(raw: &str, field: &str) -> Result<Self, RelayError> {
        let value = raw.trim().parse::<u64>().map_err(|_| {
            RelayError::validation(field, "must be a whole number of minor currency units")
        })?;
        Self::positive(value, field)
    }

    /// Major-unit decimal string with two fraction digits: `1099` -> `"10.99"`.
    pub fn to_decimal_string(&self) -> String {
        format!("{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl fmt::Display for MinorUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lowercase ISO 4217 currency code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn parse(raw: &str) -> Result<Self, RelayError> {
        let code = raw.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(RelayError::validation(
                "currency",
                format!("'{}' is not an ISO 4217 code", raw),
            ));
        }
        Ok(Self(code.to_ascii_lowercase()))
    }

    pub fn usd() -> Self {
        Self("usd".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
