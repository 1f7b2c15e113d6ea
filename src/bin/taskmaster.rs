//! Command-line front end for the taskmaster task tracker.
//!
//! Usage:
//!
//! ```text
//! taskmaster [--config FILE] [--data-dir DIR] [--json] <command>
//! ```
//!
//! Every invocation restores the task collection from the data directory,
//! applies at most one intent, and prints either the affected task, the
//! filtered view, or the summary counts.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use mockable::{Clock, DefaultClock};
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use taskmaster::config::{APP_DIR_NAME, ConfigError, TrackerConfig};
use taskmaster::task::{
    adapters::fs::FsSnapshotStore,
    domain::{DueDate, Priority, Task, TaskDomainError, TaskId},
    ports::SnapshotStoreError,
    services::{
        CreateTaskRequest, EditTaskRequest, TaskLifecycleError, TaskLifecycleService, TaskStore,
        TaskStoreError,
    },
    view::{TaskFilter, TaskStats, ViewSelection, project},
};
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const CONFIG_FILE: &str = "config.toml";

type Service = TaskLifecycleService<FsSnapshotStore, DefaultClock>;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to open data directory: {0}")]
    Storage(#[from] SnapshotStoreError),
    #[error(transparent)]
    Restore(#[from] TaskStoreError),
    #[error(transparent)]
    Lifecycle(#[from] TaskLifecycleError),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] io::Error),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("no task with id {0}")]
    NotFound(TaskId),
}

/// Personal task tracker.
#[derive(Debug, Parser)]
#[command(name = "taskmaster", version)]
struct Cli {
    /// Configuration file (defaults to the platform config directory).
    #[arg(long, global = true)]
    config: Option<Utf8PathBuf>,

    /// Directory holding the task snapshot.
    #[arg(long, env = "TASKMASTER_DATA_DIR", global = true)]
    data_dir: Option<Utf8PathBuf>,

    /// Print machine-readable JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a task.
    Add(AddArgs),
    /// Edit a task; omitted fields keep their current values.
    Edit(EditArgs),
    /// Mark a task completed, or reopen it.
    Toggle {
        /// Task identifier.
        id: TaskId,
    },
    /// Delete a task.
    Delete {
        /// Task identifier.
        id: TaskId,
    },
    /// Show the filtered, searched, and sorted task list.
    List(ListArgs),
    /// Show summary counts.
    Stats,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Task title.
    title: String,
    /// Longer description.
    #[arg(long, short = 'd', default_value = "")]
    description: String,
    /// One of low, medium, high, urgent.
    #[arg(long, short = 'p', value_parser = parse_priority, default_value = "medium")]
    priority: Priority,
    /// Due date as YYYY-MM-DD.
    #[arg(long)]
    due: Option<DueDate>,
}

impl AddArgs {
    fn into_request(self) -> CreateTaskRequest {
        let request = CreateTaskRequest::new(self.title)
            .with_description(self.description)
            .with_priority(self.priority);
        match self.due {
            Some(due) => request.with_due_date(due),
            None => request,
        }
    }
}

#[derive(Debug, Args)]
struct EditArgs {
    /// Task identifier.
    id: TaskId,
    /// New title.
    #[arg(long)]
    title: Option<String>,
    /// New description.
    #[arg(long, short = 'd')]
    description: Option<String>,
    /// New priority.
    #[arg(long, short = 'p', value_parser = parse_priority)]
    priority: Option<Priority>,
    /// New due date as YYYY-MM-DD.
    #[arg(long, conflicts_with = "clear_due")]
    due: Option<DueDate>,
    /// Remove the due date.
    #[arg(long)]
    clear_due: bool,
}

impl EditArgs {
    fn into_request(self, current: &Task) -> EditTaskRequest {
        let mut request = EditTaskRequest::prefilled(current);
        if let Some(title) = self.title {
            request = request.with_title(title);
        }
        if let Some(description) = self.description {
            request = request.with_description(description);
        }
        if let Some(priority) = self.priority {
            request = request.with_priority(priority);
        }
        if self.clear_due {
            request = request.with_due_date(None);
        } else if let Some(due) = self.due {
            request = request.with_due_date(Some(due));
        }
        request
    }
}

#[derive(Debug, Args)]
struct ListArgs {
    /// One of all, active, completed, overdue, urgent.
    #[arg(long, short = 'f', value_parser = parse_filter, default_value = "all")]
    filter: TaskFilter,
    /// Case-insensitive text matched against titles and descriptions.
    #[arg(long, short = 's', default_value = "")]
    search: String,
}

fn parse_priority(value: &str) -> Result<Priority, TaskDomainError> {
    Priority::try_from(value)
}

fn parse_filter(value: &str) -> Result<TaskFilter, TaskDomainError> {
    TaskFilter::try_from(value)
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let mut stderr = io::stderr().lock();
            if writeln!(stderr, "taskmaster: {err}").is_err() {
                return ExitCode::from(2);
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    // Tracing is opt-in via RUST_LOG; invalid filters are ignored.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| EnvFilter::try_new(raw.trim()).ok())
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref())?;
    let data_dir = config.resolve_data_dir(cli.data_dir.as_deref())?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(CliError::RuntimeInit)?;
    runtime.block_on(execute(cli.command, cli.json, &config, &data_dir))
}

fn load_config(explicit: Option<&Utf8Path>) -> Result<TrackerConfig, ConfigError> {
    if let Some(path) = explicit {
        return TrackerConfig::load(path);
    }
    let default_path = dirs::config_dir()
        .and_then(|dir| Utf8PathBuf::from_path_buf(dir).ok())
        .map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE));
    match default_path {
        Some(path) => TrackerConfig::load(&path),
        None => Ok(TrackerConfig::default()),
    }
}

async fn open_service(config: &TrackerConfig, data_dir: &Utf8Path) -> Result<Service, CliError> {
    let snapshots = Arc::new(FsSnapshotStore::open(data_dir)?);
    let store = TaskStore::open(
        snapshots,
        config.storage_key.clone(),
        config.on_corrupt_snapshot,
    )
    .await?;
    Ok(TaskLifecycleService::new(store, Arc::new(DefaultClock))
        .with_submit_latency(config.submit_latency()))
}

async fn execute(
    command: Command,
    json: bool,
    config: &TrackerConfig,
    data_dir: &Utf8Path,
) -> Result<(), CliError> {
    let mut service = open_service(config, data_dir).await?;
    let now = DefaultClock.utc();

    match command {
        Command::Add(args) => {
            let task = service.create(args.into_request()).await?;
            report_task(&service, &task, json, now)
        }
        Command::Edit(args) => {
            let Some(current) = service.store().get(&args.id) else {
                return Err(CliError::NotFound(args.id));
            };
            let request = args.into_request(current);
            let id = request.task_id().clone();
            let task = service.edit(request).await?.ok_or(CliError::NotFound(id))?;
            report_task(&service, &task, json, now)
        }
        Command::Toggle { id } => {
            let Some(task) = service.toggle_completion(&id).await else {
                return Err(CliError::NotFound(id));
            };
            report_task(&service, &task, json, now)
        }
        Command::Delete { id } => {
            let Some(task) = service.delete(&id).await else {
                return Err(CliError::NotFound(id));
            };
            report_task(&service, &task, json, now)
        }
        Command::List(args) => {
            let selection = ViewSelection::new(args.filter, &args.search);
            let visible = project(service.tasks(), &selection, now);
            write_list(&visible, json, now)
        }
        Command::Stats => write_stats(&TaskStats::collect(service.tasks(), now), json),
    }
}

fn report_task(
    service: &Service,
    task: &Task,
    json: bool,
    now: DateTime<Utc>,
) -> Result<(), CliError> {
    if !service.store().is_persisted() {
        tracing::warn!("changes were applied but could not be saved");
        let mut stderr = io::stderr().lock();
        writeln!(stderr, "warning: changes could not be saved")?;
    }
    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, task)?;
        writeln!(out)?;
        return Ok(());
    }
    writeln!(out, "{}", describe_task(task, now))?;
    Ok(())
}

fn write_list(tasks: &[&Task], json: bool, now: DateTime<Utc>) -> Result<(), CliError> {
    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, tasks)?;
        writeln!(out)?;
        return Ok(());
    }
    if tasks.is_empty() {
        writeln!(out, "no tasks")?;
    }
    for task in tasks {
        writeln!(out, "{}", describe_task(task, now))?;
    }
    Ok(())
}

fn write_stats(stats: &TaskStats, json: bool) -> Result<(), CliError> {
    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, stats)?;
        writeln!(out)?;
        return Ok(());
    }
    writeln!(out, "total:     {}", stats.total)?;
    writeln!(out, "active:    {}", stats.active)?;
    writeln!(out, "completed: {}", stats.completed)?;
    writeln!(out, "overdue:   {}", stats.overdue)?;
    writeln!(
        out,
        "urgent:    {} due soon, {} by priority",
        stats.urgent_by_due_date, stats.urgent_by_priority
    )?;
    Ok(())
}

fn describe_task(task: &Task, now: DateTime<Utc>) -> String {
    let mark = if task.is_completed() { "x" } else { " " };
    let mut line = format!(
        "[{mark}] {} {:<6} {}",
        task.id(),
        task.priority().label(),
        task.title()
    );
    if let Some(due) = task.due_date() {
        line.push_str(&format!(" ({due}, {})", due_label(task, due, now)));
    }
    line
}

fn due_label(task: &Task, due: DueDate, now: DateTime<Utc>) -> String {
    if task.is_completed() {
        return "done".to_owned();
    }
    match due.days_until(now) {
        -1 => "1 day overdue".to_owned(),
        days if days < 0 => format!("{} days overdue", days.unsigned_abs()),
        0 => "due today".to_owned(),
        1 => "due tomorrow".to_owned(),
        days => format!("due in {days} days"),
    }
}
