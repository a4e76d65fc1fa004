//! The `ApiClient` trait — how `apiCall` actions reach the network.

use async_trait::async_trait;
use serde_json::Value;

use crate::{ActionError, ApiRequest};

/// Outbound HTTP seam used by the executor.
///
/// Implementations return the decoded response body: JSON bodies as their
/// JSON value, anything else as a `Value::String`. Non-success statuses are
/// reported as [`ActionError::Network`].
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> Result<Value, ActionError>;
}
