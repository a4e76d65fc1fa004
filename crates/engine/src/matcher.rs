//! Trigger matching: which workflows does a UI event start?

use serde::{Deserialize, Serialize};

use crate::models::{TriggerType, Workflow};

/// A UI event dispatched by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: TriggerType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
}

impl Event {
    pub fn new(kind: TriggerType, component_id: impl Into<String>) -> Self {
        Self { kind, component_id: Some(component_id.into()) }
    }

    pub fn click(component_id: impl Into<String>) -> Self {
        Self::new(TriggerType::Click, component_id)
    }

    pub fn submit(component_id: impl Into<String>) -> Self {
        Self::new(TriggerType::Submit, component_id)
    }

    pub fn change(component_id: impl Into<String>) -> Self {
        Self::new(TriggerType::Change, component_id)
    }

    pub fn load() -> Self {
        Self { kind: TriggerType::Load, component_id: None }
    }
}

/// Return the enabled workflows `event` triggers, in list order.
///
/// `load` workflows match regardless of component; every other kind also
/// needs `trigger.componentId` to equal the event's component id.
pub fn matching_workflows<'a>(workflows: &'a [Workflow], event: &Event) -> Vec<&'a Workflow> {
    workflows
        .iter()
        .filter(|wf| wf.enabled && wf.trigger.kind == event.kind)
        .filter(|wf| {
            event.kind == TriggerType::Load
                || (wf.trigger.component_id.is_some()
                    && wf.trigger.component_id == event.component_id)
        })
        .collect()
}
