//! Engine-level error types.

use thiserror::Error;

/// Errors that stop a preview session from starting.
///
/// Failures inside a running workflow are not errors at this level: they
/// are recorded on the run's [`crate::RunOutcome`] and surfaced as
/// notifications.
#[derive(Debug, Error)]
pub enum EngineError {
    // ------ Definition errors ------

    /// Two or more components share the same ID (across all pages).
    #[error("duplicate component ID: '{0}'")]
    DuplicateComponentId(String),

    /// Two pages are mounted on the same route.
    #[error("duplicate page path: '{0}'")]
    DuplicatePagePath(String),

    /// Two workflows share the same ID.
    #[error("duplicate workflow ID: '{0}'")]
    DuplicateWorkflowId(String),

    /// A preview needs at least one page to land on.
    #[error("project has no pages")]
    NoPages,

    // ------ Input errors ------

    /// The project definition could not be decoded.
    #[error("invalid project definition: {0}")]
    InvalidDefinition(#[from] serde_json::Error),
}
