//! Application handlers.
//!
//! Command and query handlers that orchestrate provider calls.

pub mod relay;
