//! Domain layer containing the relay's value types and errors.
//!
//! # Module Organization
//!
//! - `payment` - Amounts, currencies, transaction statuses and relay errors

pub mod payment;
