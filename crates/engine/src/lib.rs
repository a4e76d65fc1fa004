//! `engine` crate — definition models, validation, and the workflow runtime
//! behind the builder's preview mode.

pub mod config;
pub mod error;
pub mod executor;
pub mod matcher;
pub mod models;
pub mod notifications;
pub mod session;
pub mod state;
pub mod validation;

pub use config::{ApiFailurePolicy, ExecutorConfig};
pub use error::EngineError;
pub use executor::{RunOutcome, WorkflowExecutor, WorkflowRun};
pub use matcher::{matching_workflows, Event};
pub use models::{Component, ComponentType, Page, Project, Trigger, TriggerType, Workflow};
pub use notifications::{Notification, NotificationSink, ToastQueue};
pub use session::PreviewSession;
pub use state::{ComponentRuntimeState, RuntimeState};
pub use validation::{validate_project, DefinitionWarning};

#[cfg(test)]
mod session_tests;
