//! jira-link - link the GitHub issue or pull request of a workflow event to
//! the Jira issues it mentions.
//!
//! # Environment Variables
//!
//! - `JIRA_URL` - Jira host (`acme.atlassian.net`) or full base URL (required)
//! - `JIRA_EMAIL` - Account email for basic auth (required)
//! - `JIRA_TOKEN` - Jira API token (required)
//! - `GITHUB_EVENT_PATH` - Path of the event payload JSON (set by GitHub Actions)
//! - `JIRA_TIMEOUT_SECS` - Per-request timeout, default 3, 0 disables it
//!
//! # Examples
//!
//! ```bash
//! # Inside a workflow step
//! jira-link
//!
//! # Show what would be sent for a saved payload
//! jira-link --event-path event.json --dry-run
//! ```

// CLI binaries legitimately need println! for user output
#![allow(clippy::disallowed_macros)]

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use jira_link::config::DEFAULT_TIMEOUT_SECS;
use jira_link::{Config, JiraClient, LinkError, LinkSynchronizer, TriggerEvent};

#[derive(Parser)]
#[command(name = "jira-link")]
#[command(about = "Link GitHub issues and pull requests to the Jira issues they mention")]
#[command(version)]
struct Cli {
    /// Jira host or base URL (or set `JIRA_URL` env var)
    #[arg(long, env = "JIRA_URL", default_value = "")]
    jira_url: String,

    /// Jira account email (or set `JIRA_EMAIL` env var)
    #[arg(long, env = "JIRA_EMAIL", default_value = "")]
    jira_email: String,

    /// Jira API token (or set `JIRA_TOKEN` env var)
    #[arg(long, env = "JIRA_TOKEN", hide_env_values = true, default_value = "")]
    jira_token: String,

    /// Event payload file (or set `GITHUB_EVENT_PATH` env var)
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: Option<PathBuf>,

    /// Per-request timeout in seconds (0 disables the timeout)
    #[arg(long, env = "JIRA_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Print the requests instead of sending them
    #[arg(long)]
    dry_run: bool,

    /// Log output format: text, json
    #[arg(long, default_value = "text")]
    log_format: LogFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum LogFormat {
    #[default]
    Text,
    Json,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(e) = run(cli).await {
        error!(error = ?e, "Failed to link Jira issues");
        report_failure(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn init_tracing(cli: &Cli) {
    let filter = if cli.verbose {
        EnvFilter::new("jira_link=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jira_link=info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    match cli.log_format {
        LogFormat::Text => registry.with(fmt::layer().with_target(false)).init(),
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::new(&cli.jira_url, &cli.jira_email, &cli.jira_token, cli.timeout_secs)?;
    let event_path = require_event_path(cli.event_path.as_deref())?;

    let Some(event) = TriggerEvent::load(event_path)
        .with_context(|| format!("Failed to load event from {}", event_path.display()))?
    else {
        warn!("Event carries neither an issue nor a pull request, skipping");
        return Ok(());
    };

    info!(
        action = %event.action,
        kind = event.subject.kind(),
        number = event.subject.number(),
        repository = %event.repository_full_name,
        "Processing event"
    );

    let client = JiraClient::new(&config)?;
    let sync = LinkSynchronizer::new(client);

    if cli.dry_run {
        let plan = sync.plan(&event)?;
        let Some(request) = plan.request else {
            println!("No Jira keys referenced");
            return Ok(());
        };
        let body = serde_json::to_string_pretty(&request)?;
        for key in &plan.keys {
            println!("=== Dry run: POST {} ===", sync.publisher().remote_link_url(key));
            println!("{body}");
        }
        return Ok(());
    }

    let report = sync.run(&event).await?;
    info!(
        linked = report.linked.len(),
        keys = ?report.linked.iter().map(ToString::to_string).collect::<Vec<_>>(),
        "Jira remote links up to date"
    );

    Ok(())
}

fn require_event_path(path: Option<&Path>) -> Result<&Path, LinkError> {
    path.ok_or_else(|| {
        LinkError::Configuration(
            "Input required and not supplied: event-path (GITHUB_EVENT_PATH)".to_string(),
        )
    })
}

/// Surface the failure on the workflow run when executing under GitHub Actions.
fn report_failure(message: &str) {
    if std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true") {
        println!("::error::{}", escape_workflow_message(message));
    }
}

/// Workflow commands are single-line; `%`, CR and LF must be escaped.
fn escape_workflow_message(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
