//! Mock user service for testing.
//!
//! Answers every call with a canned reply and records the bodies it saw.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::domain::payment::RelayError;
use crate::ports::{UserRelayResponse, UserService};

/// Mock user service.
#[derive(Clone)]
pub struct MockUserService {
    reply: Arc<Mutex<Result<UserRelayResponse, RelayError>>>,
    received: Arc<Mutex<Vec<(&'static str, Value)>>>,
}

impl Default for MockUserService {
    fn default() -> Self {
        Self {
            reply: Arc::new(Mutex::new(Ok(UserRelayResponse {
                status: 200,
                body: json!({ "ok": true }),
            }))),
            received: Arc::default(),
        }
    }
}

impl MockUserService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with this status and body from now on.
    pub fn with_reply(self, status: u16, body: Value) -> Self {
        *self.reply.lock().unwrap() = Ok(UserRelayResponse { status, body });
        self
    }

    /// Fail every call with this error.
    pub fn with_error(self, error: RelayError) -> Self {
        *self.reply.lock().unwrap() = Err(error);
        self
    }

    /// `(operation, body)` pairs in call order.
    pub fn received(&self) -> Vec<(&'static str, Value)> {
        self.received.lock().unwrap().clone()
    }

    fn answer(&self, operation: &'static str, body: Value) -> Result<UserRelayResponse, RelayError> {
        self.received.lock().unwrap().push((operation, body));
        self.reply.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserService for MockUserService {
    async fn login(&self, body: Value) -> Result<UserRelayResponse, RelayError> {
        self.answer("login", body)
    }

    async fn register(&self, body: Value) -> Result<UserRelayResponse, RelayError> {
        self.answer("register", body)
    }
}
