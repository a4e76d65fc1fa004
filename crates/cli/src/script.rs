//! Scripted UI steps for `canvasflow simulate`.
//!
//! An events file is a JSON array:
//!
//! ```json
//! [
//!   { "type": "input", "componentId": "email", "value": "a@b.c" },
//!   { "type": "check", "componentId": "terms", "checked": true },
//!   { "type": "click", "componentId": "signup" }
//! ]
//! ```

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use tracing::debug;

use engine::{Event, PreviewSession, TriggerType};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Step {
    Click { component_id: String },
    Submit { component_id: String },
    Change { component_id: String },
    Input { component_id: String, value: String },
    Check { component_id: String, checked: bool },
}

pub fn load(path: &Path) -> Result<Vec<Step>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read events file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("invalid events JSON in {}", path.display()))
}

impl Step {
    /// Parse an `--input componentId=value` flag.
    pub fn parse_input(flag: &str) -> Result<Self> {
        let (component_id, value) = flag
            .split_once('=')
            .ok_or_else(|| anyhow!("expected ID=VALUE, got '{flag}'"))?;
        Ok(Self::Input {
            component_id: component_id.to_owned(),
            value: value.to_owned(),
        })
    }

    /// Parse an `--event kind:componentId` flag.
    pub fn parse_event(flag: &str) -> Result<Self> {
        let (kind, component_id) = flag
            .split_once(':')
            .ok_or_else(|| anyhow!("expected KIND:ID, got '{flag}'"))?;
        let component_id = component_id.to_owned();
        match kind.parse::<TriggerType>().map_err(|e| anyhow!(e))? {
            TriggerType::Click => Ok(Self::Click { component_id }),
            TriggerType::Submit => Ok(Self::Submit { component_id }),
            TriggerType::Change => Ok(Self::Change { component_id }),
            TriggerType::Load => bail!("load workflows run automatically at session start"),
        }
    }

    pub async fn apply(self, session: &mut PreviewSession) {
        debug!(step = ?self, "applying step");
        match self {
            Self::Click { component_id } => {
                session.dispatch(Event::click(component_id)).await;
            }
            Self::Submit { component_id } => {
                session.dispatch(Event::submit(component_id)).await;
            }
            Self::Change { component_id } => {
                session.dispatch(Event::change(component_id)).await;
            }
            Self::Input { component_id, value } => {
                session.input(&component_id, &value).await;
            }
            Self::Check { component_id, checked } => {
                session.set_checked(&component_id, checked).await;
            }
        }
    }
}
