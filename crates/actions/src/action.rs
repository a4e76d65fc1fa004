//! The `Action` sum type and its JSON wire form.
//!
//! The editor stores actions as loosely-typed objects:
//!
//! ```json
//! { "type": "setValue", "target": "input1", "params": { "value": "hi" } }
//! ```
//!
//! [`ActionDefinition`] mirrors that shape exactly. [`Action`] is the closed
//! type the interpreter matches on; conversion never fails, so a definition
//! with an unknown `type` becomes [`Action::Unsupported`] and one with a
//! missing target or param keeps `None` in that slot.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// How loudly a notification should be presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info"              => Ok(Self::Info),
            "success"           => Ok(Self::Success),
            "warning" | "warn"  => Ok(Self::Warning),
            "error" | "danger"  => Ok(Self::Error),
            other               => Err(format!("unknown severity: {other}")),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info    => write!(f, "info"),
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Error   => write!(f, "error"),
        }
    }
}

// ---------------------------------------------------------------------------
// HTTP request description
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET"    => Ok(Self::Get),
            "POST"   => Ok(Self::Post),
            "PUT"    => Ok(Self::Put),
            "PATCH"  => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            other    => Err(format!("unsupported HTTP method: {other}")),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get    => write!(f, "GET"),
            Self::Post   => write!(f, "POST"),
            Self::Put    => write!(f, "PUT"),
            Self::Patch  => write!(f, "PATCH"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// An outbound request issued by an `apiCall` action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiRequest {
    pub url: String,
    pub method: HttpMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

// ---------------------------------------------------------------------------
// Wire form
// ---------------------------------------------------------------------------

/// An action exactly as the editor persists it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionDefinition {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub params: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// One step of a workflow.
///
/// `target` is a component id. Optional slots are `None` when the editor
/// left them empty; the interpreter treats those actions as no-ops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ActionDefinition", into = "ActionDefinition")]
pub enum Action {
    Show { target: Option<String> },
    Hide { target: Option<String> },
    SetValue { target: Option<String>, value: Option<String> },
    Navigate { path: Option<String> },
    Alert { message: Option<String>, severity: Severity },
    /// Fails when the target's value is empty or whitespace.
    Validate { target: Option<String>, message: Option<String> },
    /// Required-checks every input in the project, then clears the form.
    SubmitForm { message: Option<String> },
    ClearForm,
    Toggle { target: Option<String> },
    SetLoading { target: Option<String>, loading: bool },
    Disable { target: Option<String> },
    Enable { target: Option<String> },
    /// `request` is `None` when the url is missing or the method is invalid.
    ApiCall {
        target: Option<String>,
        request: Option<ApiRequest>,
        success_message: Option<String>,
    },
    /// A `type` this runtime does not know; logged and skipped. The raw
    /// `target` and `params` are kept so the definition serializes back
    /// unchanged.
    Unsupported {
        kind: String,
        target: Option<String>,
        params: Map<String, Value>,
    },
}

impl Action {
    /// The wire name of this action's kind.
    pub fn kind(&self) -> &str {
        match self {
            Self::Show { .. }        => "show",
            Self::Hide { .. }        => "hide",
            Self::SetValue { .. }    => "setValue",
            Self::Navigate { .. }    => "navigate",
            Self::Alert { .. }       => "alert",
            Self::Validate { .. }    => "validate",
            Self::SubmitForm { .. }  => "submitForm",
            Self::ClearForm          => "clearForm",
            Self::Toggle { .. }      => "toggleComponent",
            Self::SetLoading { .. }  => "setLoading",
            Self::Disable { .. }     => "disable",
            Self::Enable { .. }      => "enable",
            Self::ApiCall { .. }     => "apiCall",
            Self::Unsupported { kind, .. } => kind.as_str(),
        }
    }

    /// The component id this action addresses, if it addresses one.
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Show { target }
            | Self::Hide { target }
            | Self::SetValue { target, .. }
            | Self::Validate { target, .. }
            | Self::Toggle { target }
            | Self::SetLoading { target, .. }
            | Self::Disable { target }
            | Self::Enable { target }
            | Self::ApiCall { target, .. } => target.as_deref(),
            Self::Navigate { .. }
            | Self::Alert { .. }
            | Self::SubmitForm { .. }
            | Self::ClearForm
            | Self::Unsupported { .. } => None,
        }
    }
}

/// Read a param as text. Numbers and booleans are rendered, so a
/// `{"value": 42}` param still sets `"42"`.
fn text_param(params: &Map<String, Value>, key: &str) -> Option<String> {
    match params.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn api_request(params: &Map<String, Value>) -> Option<ApiRequest> {
    let url = text_param(params, "url").filter(|u| !u.trim().is_empty())?;
    let method = match text_param(params, "method") {
        Some(m) => m.parse().ok()?,
        None => HttpMethod::default(),
    };
    Some(ApiRequest {
        url,
        method,
        body: params.get("body").cloned(),
    })
}

impl From<ActionDefinition> for Action {
    fn from(def: ActionDefinition) -> Self {
        let ActionDefinition { kind, target: raw_target, params } = def;
        let target = raw_target.clone().or_else(|| text_param(&params, "target"));

        match kind.as_str() {
            "show" => Self::Show { target },
            "hide" => Self::Hide { target },
            "setValue" => Self::SetValue {
                target,
                value: text_param(&params, "value"),
            },
            "navigate" => Self::Navigate {
                path: text_param(&params, "path"),
            },
            "alert" => Self::Alert {
                message: text_param(&params, "message"),
                severity: text_param(&params, "severity")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_default(),
            },
            "validate" => Self::Validate {
                target,
                message: text_param(&params, "message"),
            },
            "submitForm" => Self::SubmitForm {
                message: text_param(&params, "message"),
            },
            "clearForm" => Self::ClearForm,
            "toggleComponent" | "toggle" => Self::Toggle { target },
            "setLoading" => Self::SetLoading {
                target,
                loading: params.get("loading").and_then(Value::as_bool).unwrap_or(true),
            },
            "disable" => Self::Disable { target },
            "enable" => Self::Enable { target },
            "apiCall" | "api_call" => Self::ApiCall {
                target,
                request: api_request(&params),
                success_message: text_param(&params, "successMessage"),
            },
            _ => Self::Unsupported {
                kind,
                target: raw_target,
                params,
            },
        }
    }
}

impl From<Action> for ActionDefinition {
    fn from(action: Action) -> Self {
        let kind = action.kind().to_owned();
        let mut params = Map::new();

        let target = match action {
            Action::Show { target }
            | Action::Hide { target }
            | Action::Toggle { target }
            | Action::Disable { target }
            | Action::Enable { target } => target,
            Action::SetValue { target, value } => {
                if let Some(value) = value {
                    params.insert("value".into(), Value::String(value));
                }
                target
            }
            Action::Navigate { path } => {
                if let Some(path) = path {
                    params.insert("path".into(), Value::String(path));
                }
                None
            }
            Action::Alert { message, severity } => {
                if let Some(message) = message {
                    params.insert("message".into(), Value::String(message));
                }
                params.insert("severity".into(), Value::String(severity.to_string()));
                None
            }
            Action::Validate { target, message } => {
                if let Some(message) = message {
                    params.insert("message".into(), Value::String(message));
                }
                target
            }
            Action::SubmitForm { message } => {
                if let Some(message) = message {
                    params.insert("message".into(), Value::String(message));
                }
                None
            }
            Action::ClearForm => None,
            Action::Unsupported { target, params: raw, .. } => {
                params = raw;
                target
            }
            Action::SetLoading { target, loading } => {
                params.insert("loading".into(), Value::Bool(loading));
                target
            }
            Action::ApiCall { target, request, success_message } => {
                if let Some(req) = request {
                    params.insert("url".into(), Value::String(req.url));
                    params.insert("method".into(), Value::String(req.method.to_string()));
                    if let Some(body) = req.body {
                        params.insert("body".into(), body);
                    }
                }
                if let Some(msg) = success_message {
                    params.insert("successMessage".into(), Value::String(msg));
                }
                target
            }
        };

        Self { kind, target, params }
    }
}

// ============================================================
// Unit tests
// ============================================================
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(v: Value) -> Action {
        serde_json::from_value(v).expect("action should deserialize")
    }

    #[test]
    fn set_value_reads_target_and_value() {
        let action = parse(json!({ "type": "setValue", "target": "input1", "params": { "value": "X" } }));
        assert_eq!(
            action,
            Action::SetValue { target: Some("input1".into()), value: Some("X".into()) }
        );
    }

    #[test]
    fn numeric_value_param_is_rendered_as_text() {
        let action = parse(json!({ "type": "setValue", "target": "qty", "params": { "value": 3 } }));
        assert!(matches!(action, Action::SetValue { value: Some(v), .. } if v == "3"));
    }

    #[test]
    fn unknown_kind_becomes_unsupported() {
        let action = parse(json!({ "type": "playSound", "target": "btn1" }));
        assert_eq!(
            action,
            Action::Unsupported {
                kind: "playSound".into(),
                target: Some("btn1".into()),
                params: Map::new(),
            }
        );
        assert_eq!(action.kind(), "playSound");
        assert_eq!(action.target(), None);
    }

    #[test]
    fn unknown_kind_serializes_back_unchanged() {
        let wire = json!({
            "type": "playSound",
            "target": "btn1",
            "params": { "src": "/ding.mp3", "volume": 0.5, "loop": false }
        });
        let action = parse(wire.clone());
        assert_eq!(serde_json::to_value(&action).unwrap(), wire);

        // A `target` given only inside params stays inside params.
        let wire = json!({ "type": "confetti", "params": { "target": "panel" } });
        assert_eq!(serde_json::to_value(parse(wire.clone())).unwrap(), wire);
    }

    #[test]
    fn missing_params_are_kept_as_none() {
        let action = parse(json!({ "type": "show" }));
        assert_eq!(action, Action::Show { target: None });

        let action = parse(json!({ "type": "alert" }));
        assert!(matches!(action, Action::Alert { message: None, severity: Severity::Info }));
    }

    #[test]
    fn toggle_alias_and_target_in_params() {
        let action = parse(json!({ "type": "toggle", "params": { "target": "panel" } }));
        assert_eq!(action, Action::Toggle { target: Some("panel".into()) });
    }

    #[test]
    fn set_loading_defaults_to_true() {
        let action = parse(json!({ "type": "setLoading", "target": "btn" }));
        assert_eq!(action, Action::SetLoading { target: Some("btn".into()), loading: true });

        let action = parse(json!({ "type": "setLoading", "target": "btn", "params": { "loading": false } }));
        assert_eq!(action, Action::SetLoading { target: Some("btn".into()), loading: false });
    }

    #[test]
    fn api_call_parses_request() {
        let action = parse(json!({
            "type": "api_call",
            "target": "result",
            "params": { "url": "https://api.test/items", "method": "post", "body": { "a": 1 } }
        }));
        let Action::ApiCall { target, request: Some(req), .. } = action else {
            panic!("expected a populated apiCall");
        };
        assert_eq!(target.as_deref(), Some("result"));
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.body, Some(json!({ "a": 1 })));
    }

    #[test]
    fn api_call_with_bad_method_has_no_request() {
        let action = parse(json!({ "type": "apiCall", "params": { "url": "/x", "method": "FETCH" } }));
        assert!(matches!(action, Action::ApiCall { request: None, .. }));
    }

    #[test]
    fn serializes_back_to_editor_shape() {
        let action = Action::Navigate { path: Some("/about".into()) };
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({ "type": "navigate", "params": { "path": "/about" } })
        );
    }

    #[test]
    fn alert_severity_aliases() {
        let action = parse(json!({ "type": "alert", "params": { "message": "no", "severity": "danger" } }));
        assert!(matches!(action, Action::Alert { severity: Severity::Error, .. }));
    }
}
