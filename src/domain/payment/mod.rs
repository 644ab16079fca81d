//! Payment relay domain: amounts, currencies, transaction outcomes and errors.

mod errors;
mod transaction;
mod values;

pub use errors::{ProviderError, ProviderErrorCode, RelayError};
pub use transaction::TransactionStatus;
pub use values::{CurrencyCode, MinorUnits};
