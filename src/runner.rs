//! The task runner: processes a task list one task at a time.
//!
//! For every task the runner prints a status block, removes a stale output
//! file if one exists, and hands the task to an [`Ingestor`] together with the
//! fixed `*.env` exclusion rule. Each task runs inside its own error boundary;
//! the [`FailurePolicy`] decides whether a failure stops the batch.

use crate::cancellation::CancellationToken;
use crate::core_types::{ExcludePatterns, IngestSummary};
use crate::errors::{io_error_with_path, Error, Result};
use crate::ingest::Ingestor;
use crate::progress::ProgressReporter;
use crate::task::{TaskDescriptor, TaskList};
use log::{debug, error, info};
use std::fs;
use std::io::Write;
use std::path::Path;

/// What happens to the rest of a batch when a task fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Record the failure and carry on with the next task.
    #[default]
    Continue,
    /// Stop at the first failure; remaining tasks are recorded as skipped.
    FailFast,
}

/// How a single task ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Succeeded(IngestSummary),
    /// The task failed; holds the error message.
    Failed(String),
    /// Never attempted because an earlier task failed under `FailFast`.
    Skipped,
}

/// The result of one task in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutcome {
    /// Zero-based position of the task in the list.
    pub index: usize,
    pub task: TaskDescriptor,
    /// Whether a pre-existing output file was removed before ingesting.
    pub deleted_existing: bool,
    pub status: TaskStatus,
}

/// Per-task outcomes of a batch, in task order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub outcomes: Vec<TaskOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.count(|s| matches!(s, TaskStatus::Succeeded(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, TaskStatus::Failed(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, TaskStatus::Skipped))
    }

    /// `true` when no task failed or was skipped. An empty batch is a success.
    pub fn is_success(&self) -> bool {
        self.failed() == 0 && self.skipped() == 0
    }

    /// The outcomes of failed tasks.
    pub fn failures(&self) -> impl Iterator<Item = &TaskOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, TaskStatus::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&TaskStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.status)).count()
    }
}

/// Runs every task in `tasks`, in order.
///
/// Status lines go to `console`. Each task gets exactly the `*.env` exclusion
/// rule, whatever the task contains.
///
/// # Errors
/// Per-task failures never surface here; they are recorded in the report.
/// This returns `Error::Interrupted` if the token is cancelled between tasks,
/// and `Error::Io` if the console cannot be written.
///
/// # Examples
///
/// ```
/// use digest_runner::runner::{run_tasks, FailurePolicy};
/// use digest_runner::task::TaskList;
/// use digest_runner::ingest::DigestIngestor;
/// use digest_runner::CancellationToken;
///
/// let mut console = Vec::new();
/// let report = run_tasks(
///     &TaskList::new(),
///     &DigestIngestor::default(),
///     &mut console,
///     FailurePolicy::Continue,
///     &CancellationToken::new(),
///     None,
/// )
/// .unwrap();
/// assert!(report.outcomes.is_empty());
/// assert!(console.is_empty());
/// ```
pub fn run_tasks(
    tasks: &TaskList,
    ingestor: &dyn Ingestor,
    console: &mut dyn Write,
    policy: FailurePolicy,
    token: &CancellationToken,
    progress: Option<&dyn ProgressReporter>,
) -> Result<BatchReport> {
    let exclude = ExcludePatterns::env_files();
    let mut report = BatchReport::default();
    let mut halted = false;

    if let Some(p) = progress {
        p.set_length(tasks.len() as u64);
    }
    debug!("Running {} task(s) with policy {:?}", tasks.len(), policy);

    for (index, task) in tasks.iter().enumerate() {
        if halted {
            report.outcomes.push(TaskOutcome {
                index,
                task: task.clone(),
                deleted_existing: false,
                status: TaskStatus::Skipped,
            });
            continue;
        }
        if token.is_cancelled() {
            return Err(Error::Interrupted);
        }
        if let Some(p) = progress {
            p.set_message(format!("Ingesting {}", task.source.display()));
        }

        write_status(console, task)?;

        let mut deleted_existing = false;
        let result = run_single_task(task, ingestor, &exclude, console, &mut deleted_existing);
        let status = match result {
            Ok(summary) => {
                info!("Task {} succeeded: {}", index + 1, task);
                TaskStatus::Succeeded(summary)
            }
            Err(Error::Interrupted) => return Err(Error::Interrupted),
            Err(e) => {
                error!("Task {} failed ({}): {}", index + 1, task, e);
                if policy == FailurePolicy::FailFast {
                    halted = true;
                }
                TaskStatus::Failed(e.to_string())
            }
        };
        report.outcomes.push(TaskOutcome {
            index,
            task: task.clone(),
            deleted_existing,
            status,
        });

        if let Some(p) = progress {
            p.set_position(index as u64 + 1);
        }
    }

    if let Some(p) = progress {
        p.finish_with_message(format!(
            "{} succeeded, {} failed",
            report.succeeded(),
            report.failed()
        ));
    }
    Ok(report)
}

/// The error boundary of one task: validate, clear stale output, ingest.
fn run_single_task(
    task: &TaskDescriptor,
    ingestor: &dyn Ingestor,
    exclude: &ExcludePatterns,
    console: &mut dyn Write,
    deleted_existing: &mut bool,
) -> Result<IngestSummary> {
    task.validate()?;

    if remove_stale_output(&task.output)? {
        *deleted_existing = true;
        writeln!(console, "Deleted existing file: {}", task.output.display())
            .map_err(console_error)?;
    }

    ingestor.ingest(&task.source, exclude, &task.output)
}

/// Deletes `output` if something exists there. Returns whether it did.
fn remove_stale_output(output: &Path) -> Result<bool> {
    if !output.exists() {
        return Ok(false);
    }
    fs::remove_file(output).map_err(|e| io_error_with_path(e, output))?;
    debug!("Removed stale output {}", output.display());
    Ok(true)
}

fn write_status(console: &mut dyn Write, task: &TaskDescriptor) -> Result<()> {
    writeln!(console, "Processing task:")
        .and_then(|()| writeln!(console, "  Source: {}", task.source.display()))
        .and_then(|()| writeln!(console, "  Output: {}", task.output.display()))
        .map_err(console_error)
}

fn console_error(e: std::io::Error) -> Error {
    io_error_with_path(e, "<console>")
}
