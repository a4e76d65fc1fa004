//! Action-level error type.

use thiserror::Error;

/// Errors raised while applying a single action.
///
/// The executor uses the variant to decide whether the rest of the workflow
/// still runs:
/// - `Validation` — always aborts the remaining actions of the workflow.
/// - `Network`    — aborts or continues depending on the executor's
///                  configured API failure policy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// One or more fields failed a required-value check.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An outbound request failed or returned a non-success status.
    #[error("request failed: {0}")]
    Network(String),
}

impl ActionError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
