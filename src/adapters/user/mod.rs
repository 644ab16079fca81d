//! User service adapters.
//!
//! Implementations of the `UserService` port:
//!
//! - `http_user_service` - Forwards to the external service at `users.base_url`
//! - `mock` - Canned replies for tests

mod http_user_service;
mod mock;

pub use http_user_service::HttpUserService;
pub use mock::MockUserService;
