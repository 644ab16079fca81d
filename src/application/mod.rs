//! Application layer - Commands, Queries, and Handlers.
//!
//! Handlers hold `Arc<dyn Port>` and orchestrate provider calls; they know
//! nothing about HTTP.

pub mod handlers;

pub use handlers::relay::{
    CreateEphemeralCustomerSessionCommand, CreateEphemeralCustomerSessionHandler,
    CreatePaymentIntentCommand, CreatePaymentIntentForCustomerCommand,
    CreatePaymentIntentForCustomerHandler, CreatePaymentIntentHandler, CreatePaymentIntentResult,
    CreatePaymentSheetCommand, CreatePaymentSheetHandler, EphemeralCustomerSession,
    GenerateClientTokenHandler, GenerateClientTokenQuery, PaymentSheetSession, SubmitSaleCommand,
    SubmitSaleHandler,
};
