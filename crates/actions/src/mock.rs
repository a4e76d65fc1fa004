//! `MockApiClient` — a test double for [`ApiClient`].
//!
//! Records every request it receives and answers with a
//! programmer-specified result, optionally after a delay.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::{ActionError, ApiClient, ApiRequest};

/// Behaviour injected into `MockApiClient` at construction time.
pub enum MockBehaviour {
    /// Respond with a specific JSON value.
    ReturnValue(Value),
    /// Fail with a `Network` error.
    FailNetwork(String),
}

pub struct MockApiClient {
    pub behaviour: MockBehaviour,
    /// Simulated round-trip time.
    pub delay: Duration,
    /// All requests seen by this client (in call order).
    pub calls: Arc<Mutex<Vec<ApiRequest>>>,
}

impl MockApiClient {
    /// Create a mock that always succeeds with the given value.
    pub fn returning(value: Value) -> Self {
        Self {
            behaviour: MockBehaviour::ReturnValue(value),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock that always fails with a `Network` error.
    pub fn failing(msg: impl Into<String>) -> Self {
        Self {
            behaviour: MockBehaviour::FailNetwork(msg.into()),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of requests this client has answered.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl ApiClient for MockApiClient {
    async fn send(&self, request: &ApiRequest) -> Result<Value, ActionError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match &self.behaviour {
            MockBehaviour::ReturnValue(v) => Ok(v.clone()),
            MockBehaviour::FailNetwork(msg) => Err(ActionError::Network(msg.clone())),
        }
    }
}
