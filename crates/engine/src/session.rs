//! Preview session — the runtime host the rendering layer talks to.
//!
//! A session owns the project definition, the ephemeral `RuntimeState`, and
//! the notification sink. The renderer keeps a `PreviewSession` and calls
//! its methods for every simulated user event; nothing reaches the state
//! any other way.

use std::sync::Arc;

use actions::ApiClient;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::config::ExecutorConfig;
use crate::executor::{WorkflowExecutor, WorkflowRun};
use crate::matcher::{matching_workflows, Event};
use crate::models::{Page, Project, TriggerType};
use crate::notifications::{NotificationSink, ToastQueue};
use crate::state::RuntimeState;
use crate::validation::{validate_project, DefinitionWarning};
use crate::EngineError;

pub struct PreviewSession<S: NotificationSink = ToastQueue> {
    id: Uuid,
    project: Project,
    executor: WorkflowExecutor,
    state: RuntimeState,
    sink: S,
    runs: Vec<WorkflowRun>,
    warnings: Vec<DefinitionWarning>,
}

impl PreviewSession<ToastQueue> {
    /// Start a session that reports into a [`ToastQueue`] configured from
    /// `config`.
    pub async fn with_toasts(
        project: Project,
        api: Arc<dyn ApiClient>,
        config: ExecutorConfig,
    ) -> Result<Self, EngineError> {
        let sink = ToastQueue::new(config.notification_ttl);
        Self::start(project, WorkflowExecutor::new(api, config), sink).await
    }
}

impl<S: NotificationSink> PreviewSession<S> {
    /// Validate `project`, build fresh runtime state, and run every `load`
    /// workflow once. The session is only handed out after load workflows
    /// have finished, so no user event can overtake them.
    ///
    /// # Errors
    /// Returns the hard definition errors of [`validate_project`].
    pub async fn start(
        project: Project,
        executor: WorkflowExecutor,
        sink: S,
    ) -> Result<Self, EngineError> {
        let warnings = validate_project(&project)?;
        let state = RuntimeState::new(&project);

        let mut session = Self {
            id: Uuid::new_v4(),
            project,
            executor,
            state,
            sink,
            runs: Vec::new(),
            warnings,
        };

        info!(
            session_id = %session.id,
            pages = session.project.pages.len(),
            workflows = session.project.workflows.len(),
            "preview session started"
        );
        session.fire(&Event::load()).await;

        Ok(session)
    }

    /// Run every workflow `event` triggers, in list order.
    ///
    /// An abort in one workflow does not affect its siblings. `load` events
    /// are ignored here; they fire exactly once, from [`Self::start`].
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub async fn dispatch(&mut self, event: Event) -> Vec<WorkflowRun> {
        if event.kind == TriggerType::Load {
            warn!("load workflows only run at session start, ignoring event");
            return Vec::new();
        }
        self.fire(&event).await
    }

    /// Direct user input: set a component's value, then fire its `change`
    /// workflows.
    pub async fn input(&mut self, component_id: &str, value: &str) -> Vec<WorkflowRun> {
        if !self.state.set_value(component_id, value) {
            debug!("input on unknown component '{component_id}' ignored");
            return Vec::new();
        }
        self.fire(&Event::change(component_id)).await
    }

    /// Direct user input on a checkbox or radio.
    pub async fn set_checked(&mut self, component_id: &str, checked: bool) -> Vec<WorkflowRun> {
        if !self.state.set_checked(component_id, checked) {
            debug!("check on unknown component '{component_id}' ignored");
            return Vec::new();
        }
        self.fire(&Event::change(component_id)).await
    }

    async fn fire(&mut self, event: &Event) -> Vec<WorkflowRun> {
        let matched = matching_workflows(&self.project.workflows, event);
        debug!(?event, matched = matched.len(), "dispatching event");

        let mut runs = Vec::with_capacity(matched.len());
        for workflow in matched {
            let run = self
                .executor
                .run(workflow, &self.project, &mut self.state, &mut self.sink)
                .await;
            runs.push(run);
        }

        self.runs.extend(runs.iter().cloned());
        runs
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn state(&self) -> &RuntimeState {
        &self.state
    }

    pub fn active_page(&self) -> Option<&Page> {
        self.project.page(&self.state.active_page)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Every workflow run of this session, oldest first.
    pub fn runs(&self) -> &[WorkflowRun] {
        &self.runs
    }

    pub fn warnings(&self) -> &[DefinitionWarning] {
        &self.warnings
    }
}
