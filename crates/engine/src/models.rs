//! Core definition models for the preview runtime.
//!
//! These types mirror the project JSON the builder's REST API returns
//! (camelCase field names). They are read-only inputs: running workflows
//! never mutates them.

use std::fmt;
use std::str::FromStr;

use actions::Action;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::EngineError;

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

/// Kind of a placed UI element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComponentType {
    Button,
    Input,
    Text,
    Image,
    Container,
    Checkbox,
    Radio,
    Card,
    Alert,
    Navbar,
    Divider,
    Heading,
    Link,
    Textarea,
    Select,
    Form,
    /// Any type this runtime has no special handling for.
    Other,
}

impl From<String> for ComponentType {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "button"    => Self::Button,
            "input"     => Self::Input,
            "text"      => Self::Text,
            "image"     => Self::Image,
            "container" => Self::Container,
            "checkbox"  => Self::Checkbox,
            "radio"     => Self::Radio,
            "card"      => Self::Card,
            "alert"     => Self::Alert,
            "navbar"    => Self::Navbar,
            "divider"   => Self::Divider,
            "heading"   => Self::Heading,
            "link"      => Self::Link,
            "textarea"  => Self::Textarea,
            "select"    => Self::Select,
            "form"      => Self::Form,
            _           => Self::Other,
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Button    => "button",
            Self::Input     => "input",
            Self::Text      => "text",
            Self::Image     => "image",
            Self::Container => "container",
            Self::Checkbox  => "checkbox",
            Self::Radio     => "radio",
            Self::Card      => "card",
            Self::Alert     => "alert",
            Self::Navbar    => "navbar",
            Self::Divider   => "divider",
            Self::Heading   => "heading",
            Self::Link      => "link",
            Self::Textarea  => "textarea",
            Self::Select    => "select",
            Self::Form      => "form",
            Self::Other     => "other",
        };
        f.write_str(name)
    }
}

impl From<ComponentType> for String {
    fn from(t: ComponentType) -> Self {
        t.to_string()
    }
}

/// A UI element placed on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: String,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    /// Type-specific display properties (text, color, placeholder, ...).
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub props: Map<String, Value>,
}

impl Component {
    /// Convenience constructor for testing.
    pub fn new(id: impl Into<String>, component_type: ComponentType) -> Self {
        Self {
            id: id.into(),
            component_type,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            props: Map::new(),
        }
    }

    pub fn is_input(&self) -> bool {
        self.component_type == ComponentType::Input
    }
}

// ---------------------------------------------------------------------------
// Page / Project
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Route the `navigate` action resolves against, e.g. `/about`.
    pub path: String,
    #[serde(default)]
    pub components: Vec<Component>,
}

impl Page {
    pub fn new(id: impl Into<String>, path: impl Into<String>, components: Vec<Component>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            path: path.into(),
            components,
        }
    }
}

/// Everything a preview session needs: pages (first one is the landing
/// page) and the project's workflows, in editor order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub pages: Vec<Page>,
    #[serde(default)]
    pub workflows: Vec<Workflow>,
}

impl Project {
    pub fn new(pages: Vec<Page>, workflows: Vec<Workflow>) -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            pages,
            workflows,
        }
    }

    /// Decode a project definition as the editor exports it.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Every component on every page, in page order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.pages.iter().flat_map(|p| p.components.iter())
    }

    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components().find(|c| c.id == id)
    }

    pub fn page(&self, id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub fn page_by_path(&self, path: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.path == path)
    }
}

// ---------------------------------------------------------------------------
// Trigger
// ---------------------------------------------------------------------------

/// The kind of UI event a workflow reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    Click,
    Submit,
    Change,
    /// Fires once when a preview session starts.
    Load,
}

impl fmt::Display for TriggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Click  => write!(f, "click"),
            Self::Submit => write!(f, "submit"),
            Self::Change => write!(f, "change"),
            Self::Load   => write!(f, "load"),
        }
    }
}

impl FromStr for TriggerType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "click"  => Ok(Self::Click),
            "submit" => Ok(Self::Submit),
            "change" => Ok(Self::Change),
            "load"   => Ok(Self::Load),
            other    => Err(format!("unknown trigger type: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
    #[serde(rename = "type")]
    pub kind: TriggerType,
    /// Ignored for `load` triggers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
}

impl Trigger {
    pub fn on(kind: TriggerType, component_id: impl Into<String>) -> Self {
        Self { kind, component_id: Some(component_id.into()) }
    }

    pub fn click(component_id: impl Into<String>) -> Self {
        Self::on(TriggerType::Click, component_id)
    }

    pub fn submit(component_id: impl Into<String>) -> Self {
        Self::on(TriggerType::Submit, component_id)
    }

    pub fn change(component_id: impl Into<String>) -> Self {
        Self::on(TriggerType::Change, component_id)
    }

    pub fn load() -> Self {
        Self { kind: TriggerType::Load, component_id: None }
    }
}

// ---------------------------------------------------------------------------
// Workflow
// ---------------------------------------------------------------------------

fn enabled_by_default() -> bool {
    true
}

/// A named automation unit: one trigger, an ordered list of actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub trigger: Trigger,
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

impl Workflow {
    /// Convenience constructor for testing.
    pub fn new(id: impl Into<String>, trigger: Trigger, actions: Vec<Action>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            trigger,
            actions,
            enabled: true,
        }
    }
}
