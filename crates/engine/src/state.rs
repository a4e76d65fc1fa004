//! Ephemeral runtime state of a preview session.
//!
//! Created fresh from the project when a session starts, mutated by action
//! effects and direct user input, dropped with the session. Never persisted.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::Project;

/// Per-component runtime flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRuntimeState {
    pub visible: bool,
    pub value: String,
    pub checked: bool,
    pub disabled: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for ComponentRuntimeState {
    fn default() -> Self {
        Self {
            visible: true,
            value: String::new(),
            checked: false,
            disabled: false,
            loading: false,
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeState {
    /// Keyed by component id; covers every component on every page.
    pub components: BTreeMap<String, ComponentRuntimeState>,
    /// Values entered so far, keyed by component id.
    pub form_data: BTreeMap<String, String>,
    pub active_page: String,
}

impl RuntimeState {
    /// Fresh state: every component visible and empty, landing on the
    /// project's first page.
    pub fn new(project: &Project) -> Self {
        let components = project
            .components()
            .map(|c| (c.id.clone(), ComponentRuntimeState::default()))
            .collect();

        Self {
            components,
            form_data: BTreeMap::new(),
            active_page: project.pages.first().map(|p| p.id.clone()).unwrap_or_default(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&ComponentRuntimeState> {
        self.components.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut ComponentRuntimeState> {
        self.components.get_mut(id)
    }

    /// Set a component's value and mirror it into `form_data`.
    /// Returns `false` when the component is unknown.
    pub fn set_value(&mut self, id: &str, value: impl Into<String>) -> bool {
        let Some(component) = self.components.get_mut(id) else {
            return false;
        };
        let value = value.into();
        component.value.clone_from(&value);
        self.form_data.insert(id.to_owned(), value);
        true
    }

    /// Set a checkbox/radio's `checked` flag, mirrored as `"true"`/`"false"`.
    pub fn set_checked(&mut self, id: &str, checked: bool) -> bool {
        let Some(component) = self.components.get_mut(id) else {
            return false;
        };
        component.checked = checked;
        self.form_data.insert(id.to_owned(), checked.to_string());
        true
    }

    /// Empty `form_data` and reset value and error of the given inputs.
    pub fn clear_inputs<'a>(&mut self, input_ids: impl IntoIterator<Item = &'a str>) {
        self.form_data.clear();
        for id in input_ids {
            if let Some(component) = self.components.get_mut(id) {
                component.value.clear();
                component.error = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Component, ComponentType, Page};

    fn project() -> Project {
        Project::new(
            vec![
                Page::new("home", "/", vec![Component::new("name", ComponentType::Input)]),
                Page::new("about", "/about", vec![Component::new("agree", ComponentType::Checkbox)]),
            ],
            vec![],
        )
    }

    #[test]
    fn fresh_state_is_visible_and_empty() {
        let state = RuntimeState::new(&project());
        assert_eq!(state.active_page, "home");
        assert_eq!(state.components.len(), 2);
        assert!(state.components.values().all(|c| *c == ComponentRuntimeState::default()));
        assert!(state.form_data.is_empty());
    }

    #[test]
    fn set_value_mirrors_into_form_data() {
        let mut state = RuntimeState::new(&project());
        assert!(state.set_value("name", "Ada"));
        assert_eq!(state.get("name").map(|c| c.value.as_str()), Some("Ada"));
        assert_eq!(state.form_data.get("name").map(String::as_str), Some("Ada"));
    }

    #[test]
    fn unknown_component_is_ignored() {
        let mut state = RuntimeState::new(&project());
        assert!(!state.set_value("ghost", "boo"));
        assert!(!state.set_checked("ghost", true));
        assert!(state.form_data.is_empty());
    }

    #[test]
    fn set_checked_mirrors_as_text() {
        let mut state = RuntimeState::new(&project());
        state.set_checked("agree", true);
        assert!(state.get("agree").is_some_and(|c| c.checked));
        assert_eq!(state.form_data.get("agree").map(String::as_str), Some("true"));
    }
}
