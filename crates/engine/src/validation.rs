//! Project validation — run this before starting a preview session.
//!
//! Hard errors (the session cannot start):
//! 1. The project must have at least one page.
//! 2. Component IDs must be unique across all pages.
//! 3. Page paths must be unique.
//! 4. Workflow IDs must be unique.
//!
//! Everything else is reported as a [`DefinitionWarning`]: the runtime
//! treats those cases as no-ops, but the author probably wants to know.

use std::collections::HashSet;
use std::fmt;

use actions::Action;
use serde::Serialize;
use tracing::warn;

use crate::models::{Project, TriggerType};
use crate::EngineError;

/// A definition problem that does not stop the preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionWarning {
    pub workflow_id: String,
    /// Position of the offending action, `None` for trigger problems.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_index: Option<usize>,
    pub message: String,
}

impl fmt::Display for DefinitionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.action_index {
            Some(i) => write!(f, "workflow '{}', action #{i}: {}", self.workflow_id, self.message),
            None => write!(f, "workflow '{}', trigger: {}", self.workflow_id, self.message),
        }
    }
}

/// Validate the project and return its non-fatal warnings.
///
/// # Errors
/// - [`EngineError::NoPages`] if there is nothing to render.
/// - [`EngineError::DuplicateComponentId`] if two components share an ID.
/// - [`EngineError::DuplicatePagePath`] if two pages share a route.
/// - [`EngineError::DuplicateWorkflowId`] if two workflows share an ID.
pub fn validate_project(project: &Project) -> Result<Vec<DefinitionWarning>, EngineError> {
    if project.pages.is_empty() {
        return Err(EngineError::NoPages);
    }

    // -----------------------------------------------------------------------
    // Uniqueness
    // -----------------------------------------------------------------------
    let mut component_ids: HashSet<&str> = HashSet::new();
    for component in project.components() {
        if !component_ids.insert(component.id.as_str()) {
            return Err(EngineError::DuplicateComponentId(component.id.clone()));
        }
    }

    let mut paths: HashSet<&str> = HashSet::new();
    for page in &project.pages {
        if !paths.insert(page.path.as_str()) {
            return Err(EngineError::DuplicatePagePath(page.path.clone()));
        }
    }

    let mut workflow_ids: HashSet<&str> = HashSet::new();
    for workflow in &project.workflows {
        if !workflow_ids.insert(workflow.id.as_str()) {
            return Err(EngineError::DuplicateWorkflowId(workflow.id.clone()));
        }
    }

    // -----------------------------------------------------------------------
    // References
    // -----------------------------------------------------------------------
    let mut warnings = Vec::new();

    for workflow in &project.workflows {
        let mut push = |action_index: Option<usize>, message: String| {
            warnings.push(DefinitionWarning {
                workflow_id: workflow.id.clone(),
                action_index,
                message,
            });
        };

        match (&workflow.trigger.kind, &workflow.trigger.component_id) {
            (TriggerType::Load, _) => {}
            (kind, None) => push(None, format!("{kind} trigger has no componentId and can never fire")),
            (_, Some(id)) if !component_ids.contains(id.as_str()) => {
                push(None, format!("trigger references unknown component '{id}'"));
            }
            _ => {}
        }

        for (index, action) in workflow.actions.iter().enumerate() {
            if let Some(target) = action.target() {
                if !component_ids.contains(target) {
                    push(Some(index), format!("{} targets unknown component '{target}'", action.kind()));
                }
            }

            let problem = match action {
                Action::Unsupported { kind, .. } => Some(format!("unsupported action kind '{kind}'")),
                Action::SetValue { value: None, .. } => Some("setValue has no value".to_owned()),
                Action::Alert { message: None, .. } => Some("alert has no message".to_owned()),
                Action::Navigate { path: None } => Some("navigate has no path".to_owned()),
                Action::Navigate { path: Some(path) } if project.page_by_path(path).is_none() => {
                    Some(format!("navigate to unknown path '{path}'"))
                }
                Action::ApiCall { request: None, .. } => {
                    Some("apiCall has no url or an unsupported method".to_owned())
                }
                _ => None,
            };
            if let Some(message) = problem {
                push(Some(index), message);
            }
        }
    }

    for warning in &warnings {
        warn!("{warning}");
    }

    Ok(warnings)
}
