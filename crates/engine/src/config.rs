//! Executor configuration.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What a failed `apiCall` does to the rest of its workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiFailurePolicy {
    /// Notify and keep running the remaining actions.
    #[default]
    Continue,
    /// Notify and abort the workflow, like a validation failure.
    Abort,
}

impl FromStr for ApiFailurePolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "continue" => Ok(Self::Continue),
            "abort"    => Ok(Self::Abort),
            other      => Err(format!("unknown API failure policy: {other}")),
        }
    }
}

/// Tuning knobs for the executor.
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Pause between consecutive actions of one workflow. Purely
    /// presentational; zero applies every action back to back.
    pub action_delay: Duration,
    /// How long a notification stays in the toast queue.
    pub notification_ttl: Duration,
    pub api_failure: ApiFailurePolicy,
    /// Timeout for real `apiCall` requests.
    pub http_timeout: Duration,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            action_delay: Duration::ZERO,
            notification_ttl: Duration::from_millis(3000),
            api_failure: ApiFailurePolicy::Continue,
            http_timeout: Duration::from_secs(10),
        }
    }
}
