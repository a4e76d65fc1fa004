//! End-to-end tests for `PreviewSession`: events in, runtime state and
//! notifications out.

use std::sync::Arc;

use actions::mock::MockApiClient;
use actions::Action;
use serde_json::{json, Value};

use crate::config::ExecutorConfig;
use crate::matcher::Event;
use crate::models::{Project, TriggerType};
use crate::notifications::ToastQueue;
use crate::session::PreviewSession;
use crate::{EngineError, RunOutcome};

/// Login form: `input1` + `btn1` on `/`, a `/welcome` page.
fn project(workflows: Value) -> Project {
    serde_json::from_value(json!({
        "id": "demo",
        "name": "Demo",
        "pages": [
            {
                "id": "home",
                "path": "/",
                "components": [
                    { "id": "input1", "type": "input" },
                    { "id": "btn1", "type": "button" },
                    { "id": "btn2", "type": "button" },
                    { "id": "banner", "type": "alert" },
                    { "id": "terms", "type": "checkbox" }
                ]
            },
            { "id": "welcome", "path": "/welcome", "components": [] }
        ],
        "workflows": workflows
    }))
    .expect("fixture project should parse")
}

async fn start(project: Project) -> PreviewSession {
    PreviewSession::with_toasts(
        project,
        Arc::new(MockApiClient::returning(json!(null))),
        ExecutorConfig::default(),
    )
    .await
    .expect("session should start")
}

fn messages(session: &PreviewSession) -> Vec<String> {
    session.sink().history().iter().map(|n| n.message.clone()).collect()
}

fn validate_then_alert() -> Value {
    json!([{
        "id": "wf1",
        "name": "Check",
        "trigger": { "type": "click", "componentId": "btn1" },
        "actions": [
            { "type": "validate", "target": "input1" },
            { "type": "alert", "params": { "message": "ok" } }
        ]
    }])
}

// ============================================================
// Scenarios
// ============================================================

#[tokio::test]
async fn click_with_empty_input_flags_error_and_suppresses_alert() {
    let mut session = start(project(validate_then_alert())).await;

    let runs = session.dispatch(Event::click("btn1")).await;

    assert_eq!(runs.len(), 1);
    assert!(!runs[0].completed());
    assert!(session.state().get("input1").is_some_and(|c| c.error.is_some()));
    assert!(!messages(&session).contains(&"ok".to_owned()));
}

#[tokio::test]
async fn click_with_filled_input_clears_error_and_alerts() {
    let mut session = start(project(validate_then_alert())).await;

    session.dispatch(Event::click("btn1")).await;
    assert!(session.state().get("input1").is_some_and(|c| c.error.is_some()));

    session.input("input1", "hello").await;
    let runs = session.dispatch(Event::click("btn1")).await;

    assert!(runs[0].completed());
    assert_eq!(session.state().get("input1").and_then(|c| c.error.clone()), None);
    assert_eq!(messages(&session).last().map(String::as_str), Some("ok"));
}

// ============================================================
// Load triggers
// ============================================================

#[tokio::test]
async fn load_workflows_run_once_before_any_event() {
    let mut session = start(project(json!([
        {
            "id": "init",
            "trigger": { "type": "load" },
            "actions": [
                { "type": "hide", "target": "banner" },
                { "type": "setValue", "target": "input1", "params": { "value": "prefilled" } }
            ]
        },
        {
            "id": "reveal",
            "trigger": { "type": "click", "componentId": "btn2" },
            "actions": [{ "type": "show", "target": "banner" }]
        }
    ])))
    .await;

    // Load already ran when `start` returned.
    assert_eq!(session.runs().len(), 1);
    assert_eq!(session.runs()[0].workflow_id, "init");
    assert_eq!(session.state().get("banner").map(|c| c.visible), Some(false));
    assert_eq!(session.state().get("input1").map(|c| c.value.as_str()), Some("prefilled"));

    // A later load event is ignored.
    let runs = session.dispatch(Event::load()).await;
    assert!(runs.is_empty());
    assert_eq!(session.runs().len(), 1);

    session.dispatch(Event::click("btn2")).await;
    assert_eq!(session.state().get("banner").map(|c| c.visible), Some(true));
    assert_eq!(session.runs().len(), 2);
}

// ============================================================
// Matching
// ============================================================

#[tokio::test]
async fn only_workflows_bound_to_the_clicked_component_fire() {
    let mut session = start(project(json!([
        {
            "id": "one",
            "trigger": { "type": "click", "componentId": "btn1" },
            "actions": [{ "type": "alert", "params": { "message": "btn1" } }]
        },
        {
            "id": "two",
            "trigger": { "type": "click", "componentId": "btn2" },
            "actions": [{ "type": "alert", "params": { "message": "btn2" } }]
        },
        {
            "id": "submit-one",
            "trigger": { "type": "submit", "componentId": "btn1" },
            "actions": [{ "type": "alert", "params": { "message": "submitted" } }]
        }
    ])))
    .await;

    let runs = session.dispatch(Event::click("btn1")).await;

    assert_eq!(runs.iter().map(|r| r.workflow_id.as_str()).collect::<Vec<_>>(), vec!["one"]);
    assert_eq!(messages(&session), vec!["btn1"]);

    session.dispatch(Event::submit("btn1")).await;
    assert_eq!(messages(&session), vec!["btn1", "submitted"]);
}

#[tokio::test]
async fn abort_in_one_workflow_leaves_siblings_running() {
    let mut session = start(project(json!([
        {
            "id": "strict",
            "trigger": { "type": "click", "componentId": "btn1" },
            "actions": [
                { "type": "validate", "target": "input1" },
                { "type": "alert", "params": { "message": "strict passed" } }
            ]
        },
        {
            "id": "lenient",
            "trigger": { "type": "click", "componentId": "btn1" },
            "actions": [{ "type": "alert", "params": { "message": "lenient ran" } }]
        }
    ])))
    .await;

    let runs = session.dispatch(Event::click("btn1")).await;

    assert_eq!(runs.len(), 2);
    assert!(matches!(runs[0].outcome, RunOutcome::Aborted { .. }));
    assert!(runs[1].completed());
    assert_eq!(messages(&session), vec!["This field is required", "lenient ran"]);
}

#[tokio::test]
async fn toggling_in_two_runs_restores_visibility() {
    let mut session = start(project(json!([{
        "id": "toggle",
        "trigger": { "type": "click", "componentId": "btn2" },
        "actions": [{ "type": "toggleComponent", "target": "banner" }]
    }])))
    .await;

    session.dispatch(Event::click("btn2")).await;
    assert_eq!(session.state().get("banner").map(|c| c.visible), Some(false));
    session.dispatch(Event::click("btn2")).await;
    assert_eq!(session.state().get("banner").map(|c| c.visible), Some(true));
}

// ============================================================
// User input
// ============================================================

#[tokio::test]
async fn input_updates_form_data_and_fires_change_workflows() {
    let mut session = start(project(json!([{
        "id": "mirror",
        "trigger": { "type": "change", "componentId": "terms" },
        "actions": [{ "type": "enable", "target": "btn1" }]
    }, {
        "id": "lock",
        "trigger": { "type": "load" },
        "actions": [{ "type": "disable", "target": "btn1" }]
    }])))
    .await;

    assert_eq!(session.state().get("btn1").map(|c| c.disabled), Some(true));

    let runs = session.input("input1", "typed").await;
    assert!(runs.is_empty());
    assert_eq!(session.state().form_data.get("input1").map(String::as_str), Some("typed"));

    let runs = session.set_checked("terms", true).await;
    assert_eq!(runs.len(), 1);
    assert_eq!(session.state().get("btn1").map(|c| c.disabled), Some(false));
    assert_eq!(session.state().form_data.get("terms").map(String::as_str), Some("true"));

    assert!(session.input("ghost", "x").await.is_empty());
}

#[tokio::test]
async fn clear_form_empties_everything() {
    let mut session = start(project(json!([{
        "id": "reset",
        "trigger": { "type": "click", "componentId": "btn2" },
        "actions": [{ "type": "clearForm" }]
    }])))
    .await;

    session.input("input1", "something").await;
    session.set_checked("terms", true).await;
    session.dispatch(Event::click("btn2")).await;

    assert!(session.state().form_data.is_empty());
    assert_eq!(session.state().get("input1").map(|c| c.value.as_str()), Some(""));
}

// ============================================================
// Navigation, definitions, and setup errors
// ============================================================

#[tokio::test]
async fn navigate_changes_the_active_page() {
    let mut session = start(project(json!([{
        "id": "go",
        "trigger": { "type": "click", "componentId": "btn1" },
        "actions": [{ "type": "navigate", "params": { "path": "/welcome" } }]
    }])))
    .await;

    assert_eq!(session.active_page().map(|p| p.id.as_str()), Some("home"));
    session.dispatch(Event::click("btn1")).await;
    assert_eq!(session.active_page().map(|p| p.id.as_str()), Some("welcome"));
}

#[tokio::test]
async fn warnings_are_kept_on_the_session() {
    let session = start(project(json!([{
        "id": "odd",
        "trigger": { "type": "click", "componentId": "btn1" },
        "actions": [{ "type": "launchRocket" }]
    }])))
    .await;

    assert_eq!(session.warnings().len(), 1);
    assert!(matches!(
        &session.project().workflows[0].actions[0],
        Action::Unsupported { kind, .. } if kind == "launchRocket"
    ));
}

#[tokio::test]
async fn start_rejects_duplicate_component_ids() {
    let mut project = project(json!([]));
    let duplicate = project.pages[0].components[0].clone();
    project.pages[1].components.push(duplicate);

    let result = PreviewSession::start(
        project,
        crate::WorkflowExecutor::new(
            Arc::new(MockApiClient::returning(json!(null))),
            ExecutorConfig::default(),
        ),
        ToastQueue::default(),
    )
    .await;

    assert!(matches!(result, Err(EngineError::DuplicateComponentId(id)) if id == "input1"));
}

#[tokio::test]
async fn change_trigger_type_round_trips() {
    let event: Event = serde_json::from_value(json!({ "type": "change", "componentId": "terms" }))
        .expect("event should parse");
    assert_eq!(event.kind, TriggerType::Change);
    assert_eq!(event, Event::change("terms"));
}
