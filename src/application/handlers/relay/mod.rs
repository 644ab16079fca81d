//! Payment relay handlers.
//!
//! ## Commands
//! - Creating fixed-price payment intents
//! - Creating ephemeral customer sessions
//! - Creating payment intents for a customer
//! - Assembling the mobile payment sheet
//! - Submitting gateway sales
//!
//! ## Queries
//! - Generating gateway client tokens

mod create_customer_session;
mod create_payment_intent;
mod create_payment_intent_for_customer;
mod create_payment_sheet;
mod generate_client_token;
mod submit_sale;

// Commands
pub use create_customer_session::{
    CreateEphemeralCustomerSessionCommand, CreateEphemeralCustomerSessionHandler,
    EphemeralCustomerSession,
};
pub use create_payment_intent::{
    CreatePaymentIntentCommand, CreatePaymentIntentHandler, CreatePaymentIntentResult,
};
pub use create_payment_intent_for_customer::{
    CreatePaymentIntentForCustomerCommand, CreatePaymentIntentForCustomerHandler,
};
pub use create_payment_sheet::{
    CreatePaymentSheetCommand, CreatePaymentSheetHandler, PaymentSheetSession,
};
pub use submit_sale::{SubmitSaleCommand, SubmitSaleHandler};

// Queries
pub use generate_client_token::{GenerateClientTokenHandler, GenerateClientTokenQuery};
