//! `canvasflow` CLI entry-point.
//!
//! Available sub-commands:
//! - `validate` — check a project JSON file for definition errors.
//! - `simulate` — start a preview session, replay scripted UI events, and
//!                print the resulting runtime state.

mod script;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use actions::HttpApiClient;
use engine::{
    ApiFailurePolicy, DefinitionWarning, ExecutorConfig, Notification, PreviewSession, Project,
    RuntimeState, WorkflowRun,
};

use crate::script::Step;

#[derive(Parser)]
#[command(
    name = "canvasflow",
    about = "Preview runtime for canvas-built web apps",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a project definition JSON file.
    Validate {
        /// Path to the project JSON file.
        path: PathBuf,
    },
    /// Run a preview session against scripted UI events.
    Simulate {
        /// Path to the project JSON file.
        path: PathBuf,
        /// JSON array of steps to replay first.
        #[arg(long)]
        events: Option<PathBuf>,
        /// Direct input as `componentId=value`; applied after `--events`.
        #[arg(long = "input", value_name = "ID=VALUE")]
        inputs: Vec<String>,
        /// Event as `kind:componentId` (click, submit, change); applied last.
        #[arg(long = "event", value_name = "KIND:ID")]
        event_flags: Vec<String>,
        #[command(flatten)]
        runtime: RuntimeArgs,
    },
}

#[derive(Args)]
struct RuntimeArgs {
    /// Pause between consecutive actions of a workflow.
    #[arg(long, env = "CANVASFLOW_ACTION_DELAY_MS", default_value_t = 0)]
    action_delay_ms: u64,
    /// Lifetime of a notification toast.
    #[arg(long, env = "CANVASFLOW_TOAST_TTL_MS", default_value_t = 3000)]
    toast_ttl_ms: u64,
    /// What a failed apiCall does to its workflow: `continue` or `abort`.
    #[arg(long, env = "CANVASFLOW_API_FAILURE", default_value = "continue")]
    api_failure: ApiFailurePolicy,
    #[arg(long, env = "CANVASFLOW_HTTP_TIMEOUT_SECS", default_value_t = 10)]
    http_timeout_secs: u64,
}

impl From<&RuntimeArgs> for ExecutorConfig {
    fn from(args: &RuntimeArgs) -> Self {
        Self {
            action_delay: Duration::from_millis(args.action_delay_ms),
            notification_ttl: Duration::from_millis(args.toast_ttl_ms),
            api_failure: args.api_failure,
            http_timeout: Duration::from_secs(args.http_timeout_secs),
        }
    }
}

/// What `simulate` prints once the script has run.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulationReport<'a> {
    session_id: String,
    active_page: Option<&'a str>,
    state: &'a RuntimeState,
    runs: &'a [WorkflowRun],
    notifications: &'a [Notification],
    warnings: &'a [DefinitionWarning],
}

fn load_project(path: &Path) -> Result<Project> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read file {}", path.display()))?;
    Project::from_json(&content).with_context(|| format!("cannot load project {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cli=info,engine=info,actions=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Validate { path } => {
            let project = load_project(&path)?;
            match engine::validate_project(&project) {
                Ok(warnings) if warnings.is_empty() => {
                    println!("✅ Project is valid.");
                }
                Ok(warnings) => {
                    println!("✅ Project is valid with {} warning(s):", warnings.len());
                    for warning in warnings {
                        println!("  ⚠ {warning}");
                    }
                }
                Err(e) => {
                    eprintln!("❌ Validation failed: {e}");
                    std::process::exit(1);
                }
            }
        }
        Command::Simulate { path, events, inputs, event_flags, runtime } => {
            let project = load_project(&path)?;

            let mut steps = match events {
                Some(events_path) => script::load(&events_path)?,
                None => Vec::new(),
            };
            for input in &inputs {
                steps.push(Step::parse_input(input)?);
            }
            for flag in &event_flags {
                steps.push(Step::parse_event(flag)?);
            }

            let config = ExecutorConfig::from(&runtime);
            let api = HttpApiClient::new(config.http_timeout)?;
            let mut session = PreviewSession::with_toasts(project, Arc::new(api), config).await?;

            info!("replaying {} step(s)", steps.len());
            for step in steps {
                step.apply(&mut session).await;
            }

            let report = SimulationReport {
                session_id: session.id().to_string(),
                active_page: session.active_page().map(|p| p.path.as_str()),
                state: session.state(),
                runs: session.runs(),
                notifications: session.sink().history(),
                warnings: session.warnings(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
