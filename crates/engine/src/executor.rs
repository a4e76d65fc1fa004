//! Workflow execution engine.
//!
//! `WorkflowExecutor` interprets one workflow at a time:
//! 1. Walks the workflow's actions in list order.
//! 2. Applies each action's effect to the session's `RuntimeState` before
//!    the next one starts (including awaiting an `apiCall` response).
//! 3. Emits notifications through the caller's `NotificationSink`.
//! 4. Stops at the first validation failure; request failures stop the
//!    workflow only under `ApiFailurePolicy::Abort`.
//!
//! Missing targets and missing params are silent no-ops; unsupported
//! action kinds are logged and skipped.

use std::sync::Arc;

use actions::{Action, ActionError, ApiClient, Severity};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::config::{ApiFailurePolicy, ExecutorConfig};
use crate::models::{Project, Workflow};
use crate::notifications::NotificationSink;
use crate::state::{ComponentRuntimeState, RuntimeState};

const REQUIRED_FIELD: &str = "This field is required";
const SUBMIT_FAILED: &str = "Please fill in all required fields";
const SUBMIT_SUCCEEDED: &str = "Form submitted successfully";

// ---------------------------------------------------------------------------
// Output of a completed run
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    Completed,
    /// `action_index` is the position of the action that stopped the run.
    Aborted { action_index: usize, reason: String },
}

/// Report of one workflow run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRun {
    pub workflow_id: String,
    pub outcome: RunOutcome,
    /// Actions that were executed, including the one that aborted the run.
    pub actions_run: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl WorkflowRun {
    pub fn completed(&self) -> bool {
        self.outcome == RunOutcome::Completed
    }
}

// ---------------------------------------------------------------------------
// WorkflowExecutor
// ---------------------------------------------------------------------------

/// Stateless interpreter; all mutable state is passed in by the session
/// that owns it.
pub struct WorkflowExecutor {
    api: Arc<dyn ApiClient>,
    config: ExecutorConfig,
}

impl WorkflowExecutor {
    pub fn new(api: Arc<dyn ApiClient>, config: ExecutorConfig) -> Self {
        Self { api, config }
    }

    /// Run every action of `workflow` in order against `state`.
    #[instrument(skip_all, fields(workflow_id = %workflow.id))]
    pub async fn run<S>(
        &self,
        workflow: &Workflow,
        project: &Project,
        state: &mut RuntimeState,
        sink: &mut S,
    ) -> WorkflowRun
    where
        S: NotificationSink + ?Sized,
    {
        let started_at = Utc::now();
        info!(
            "running workflow '{}' ({} actions)",
            workflow.name,
            workflow.actions.len()
        );

        let mut outcome = RunOutcome::Completed;
        let mut actions_run = 0;

        for (index, action) in workflow.actions.iter().enumerate() {
            if index > 0 && !self.config.action_delay.is_zero() {
                tokio::time::sleep(self.config.action_delay).await;
            }

            actions_run += 1;
            let Err(err) = self.apply(action, project, state, sink).await else {
                continue;
            };

            if self.aborts(&err) {
                warn!("action #{index} ({}) aborted the workflow: {err}", action.kind());
                outcome = RunOutcome::Aborted {
                    action_index: index,
                    reason: err.to_string(),
                };
                break;
            }
            warn!("action #{index} ({}) failed, continuing: {err}", action.kind());
        }

        info!(?outcome, actions_run, "workflow '{}' finished", workflow.name);

        WorkflowRun {
            workflow_id: workflow.id.clone(),
            outcome,
            actions_run,
            started_at,
            finished_at: Utc::now(),
        }
    }

    fn aborts(&self, err: &ActionError) -> bool {
        match err {
            ActionError::Validation(_) => true,
            ActionError::Network(_) => self.config.api_failure == ApiFailurePolicy::Abort,
        }
    }

    // -----------------------------------------------------------------------
    // Internal: apply a single action.
    // -----------------------------------------------------------------------

    async fn apply<S>(
        &self,
        action: &Action,
        project: &Project,
        state: &mut RuntimeState,
        sink: &mut S,
    ) -> Result<(), ActionError>
    where
        S: NotificationSink + ?Sized,
    {
        match action {
            Action::Show { target } => update(state, target.as_deref(), |c| c.visible = true),
            Action::Hide { target } => update(state, target.as_deref(), |c| c.visible = false),
            Action::Toggle { target } => update(state, target.as_deref(), |c| c.visible = !c.visible),
            Action::Disable { target } => update(state, target.as_deref(), |c| c.disabled = true),
            Action::Enable { target } => update(state, target.as_deref(), |c| c.disabled = false),
            Action::SetLoading { target, loading } => {
                update(state, target.as_deref(), |c| c.loading = *loading);
            }

            Action::SetValue { target, value } => match (target, value) {
                (Some(id), Some(value)) => {
                    if !state.set_value(id, value.as_str()) {
                        debug!("setValue: component '{id}' not found, skipping");
                    }
                }
                _ => debug!("setValue without target or value, skipping"),
            },

            Action::Navigate { path: Some(path) } => match project.page_by_path(path) {
                Some(page) => {
                    info!("navigating to page '{}' ({path})", page.id);
                    state.active_page.clone_from(&page.id);
                }
                None => sink.notify(&format!("Navigating to {path}"), Severity::Info),
            },
            Action::Navigate { path: None } => debug!("navigate without path, skipping"),

            Action::Alert { message: Some(message), severity } => sink.notify(message, *severity),
            Action::Alert { message: None, .. } => debug!("alert without message, skipping"),

            Action::Validate { target, message } => {
                let Some(component) = target.as_deref().and_then(|id| state.get_mut(id)) else {
                    debug!("validate: target {target:?} not found, skipping");
                    return Ok(());
                };
                if component.value.trim().is_empty() {
                    let message = message.as_deref().unwrap_or(REQUIRED_FIELD);
                    component.error = Some(message.to_owned());
                    sink.notify(message, Severity::Error);
                    return Err(ActionError::Validation(format!(
                        "'{}' is empty",
                        target.as_deref().unwrap_or_default()
                    )));
                }
                component.error = None;
            }

            Action::SubmitForm { message } => {
                let inputs = input_ids(project);
                let mut empty = Vec::new();
                for id in &inputs {
                    if let Some(component) = state.get_mut(id) {
                        if component.value.trim().is_empty() {
                            component.error = Some(REQUIRED_FIELD.to_owned());
                            empty.push(*id);
                        } else {
                            component.error = None;
                        }
                    }
                }

                if !empty.is_empty() {
                    sink.notify(SUBMIT_FAILED, Severity::Error);
                    return Err(ActionError::Validation(format!(
                        "required fields empty: {}",
                        empty.join(", ")
                    )));
                }

                info!(fields = state.form_data.len(), "form submitted");
                state.clear_inputs(inputs);
                sink.notify(message.as_deref().unwrap_or(SUBMIT_SUCCEEDED), Severity::Success);
            }

            Action::ClearForm => {
                let inputs = input_ids(project);
                state.clear_inputs(inputs);
            }

            Action::ApiCall { target, request, success_message } => {
                let Some(request) = request else {
                    debug!("apiCall without a usable request, skipping");
                    return Ok(());
                };

                match self.api.send(request).await {
                    Ok(response) => {
                        if let Some(id) = target {
                            state.set_value(id, render(&response));
                        }
                        if let Some(msg) = success_message {
                            sink.notify(msg, Severity::Success);
                        }
                    }
                    Err(err) => {
                        sink.notify(&format!("API call failed: {err}"), Severity::Error);
                        return Err(err);
                    }
                }
            }

            Action::Unsupported { kind, .. } => warn!("unsupported action kind '{kind}', skipping"),
        }

        Ok(())
    }
}

/// Apply `f` to the target's state; a missing target is a no-op.
fn update(
    state: &mut RuntimeState,
    target: Option<&str>,
    f: impl FnOnce(&mut ComponentRuntimeState),
) {
    match target.and_then(|id| state.get_mut(id)) {
        Some(component) => f(component),
        None => debug!("target {target:?} not found, skipping"),
    }
}

/// Ids of every input component in the project, across all pages.
fn input_ids(project: &Project) -> Vec<&str> {
    project
        .components()
        .filter(|c| c.is_input())
        .map(|c| c.id.as_str())
        .collect()
}

/// Text written into a component for an API response.
fn render(response: &Value) -> String {
    match response {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
