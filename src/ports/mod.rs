//! Ports - interfaces to the outside world.
//!
//! Adapters in `crate::adapters` implement these traits; handlers only ever
//! see `Arc<dyn Port>`, so tests can substitute fakes.

mod card_processor;
mod payment_gateway;
mod user_service;

pub use card_processor::{CardProcessor, Customer, EphemeralKey, PaymentIntent, PaymentIntentRequest};
pub use payment_gateway::{ClientToken, PaymentGateway, SaleRequest, SaleResult};
pub use user_service::{UserRelayResponse, UserService};
