//! `digest-runner` is a library and command-line tool that turns directory trees
//! into plain-text digests, one output file per task.
//!
//! A run works through an ordered list of tasks. For each task it:
//! 1.  **Announces** the task on the console (`Processing task:` plus the source
//!     and output paths).
//! 2.  **Clears** any file already sitting at the output path.
//! 3.  **Ingests** the source directory into the output file, always leaving out
//!     files that match `*.env`.
//!
//! Every task runs inside its own error boundary. A failing task is recorded in
//! the [`BatchReport`] and, under the default [`FailurePolicy::Continue`], the
//! remaining tasks still run.
//!
//! # Example: Library Usage
//!
//! ```
//! use digest_runner::{execute, CancellationToken, ConfigBuilder, TaskDescriptor};
//! use digest_runner::ingest::DigestIngestor;
//! use std::fs;
//! use tempfile::tempdir;
//!
//! // 1. Set up a source directory with a secret that must stay out of the digest.
//! let temp_dir = tempdir().unwrap();
//! let source = temp_dir.path().join("project");
//! fs::create_dir(&source).unwrap();
//! fs::write(source.join("main.rs"), "fn main() {}").unwrap();
//! fs::write(source.join("prod.env"), "TOKEN=secret").unwrap();
//! let output = temp_dir.path().join("digest.txt");
//!
//! // 2. Build a Config with one explicit task.
//! let config = ConfigBuilder::new()
//!     .tasks(vec![TaskDescriptor::new(&source, &output)])
//!     .build()
//!     .unwrap();
//!
//! // 3. Run it, capturing the status lines in memory.
//! let token = CancellationToken::new();
//! let ingestor = DigestIngestor::new(config.ingest.clone(), token.clone());
//! let mut console = Vec::new();
//! let report = execute(&config, &ingestor, &mut console, &token, None).unwrap();
//!
//! // 4. Inspect the result.
//! assert!(report.is_success());
//! let digest = fs::read_to_string(&output).unwrap();
//! assert!(digest.contains("FILE: main.rs"));
//! assert!(!digest.contains("TOKEN=secret"));
//! assert!(String::from_utf8(console).unwrap().starts_with("Processing task:"));
//! ```

pub mod cancellation;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core_types;
pub mod errors;
pub mod ingest;
pub mod prelude;
pub mod progress;
pub mod runner;
pub mod signal;
pub mod task;

// Re-export key public types for easier use as a library
pub use cancellation::CancellationToken;
pub use config::{Config, ConfigBuilder};
pub use core_types::{ExcludePatterns, IngestSummary};
pub use runner::{BatchReport, FailurePolicy, TaskOutcome, TaskStatus};
pub use task::{default_tasks, TaskDescriptor, TaskList};

use crate::errors::Result;
use crate::ingest::{DigestIngestor, Ingestor};
use crate::progress::ProgressReporter;
use std::io::Write;
use std::sync::Arc;

/// Runs the tasks of `config` against any [`Ingestor`].
///
/// This is the seam used by embedders and tests: status lines go to `console`
/// instead of stdout, and the ingestion backend is supplied by the caller.
///
/// # Arguments
/// * `config` - The task list and failure policy for the run.
/// * `ingestor` - The backend that writes each digest.
/// * `console` - Where the `Processing task:` status lines are written.
/// * `token` - Cancels the run between tasks.
/// * `progress` - An optional progress reporter, advanced once per task.
///
/// # Returns
/// A [`BatchReport`] with one outcome per task, in task order. Failed tasks do
/// not make this return `Err`; only interruption and console I/O errors do.
pub fn execute(
    config: &Config,
    ingestor: &dyn Ingestor,
    console: &mut dyn Write,
    token: &CancellationToken,
    progress: Option<&dyn ProgressReporter>,
) -> Result<BatchReport> {
    runner::run_tasks(
        &config.tasks,
        ingestor,
        console,
        config.failure_policy,
        token,
        progress,
    )
}

/// Executes the complete batch with the bundled [`DigestIngestor`], printing
/// status lines to stdout.
///
/// This mirrors the command-line execution. Use [`execute`] to capture the
/// status lines or plug in another ingestion backend.
pub fn run(
    config: &Config,
    token: &CancellationToken,
    progress: Option<Arc<dyn ProgressReporter>>,
) -> Result<BatchReport> {
    let ingestor = DigestIngestor::new(config.ingest.clone(), token.clone());
    let stdout = std::io::stdout();
    let mut console = stdout.lock();
    let report = execute(config, &ingestor, &mut console, token, progress.as_deref())?;
    log::debug!(
        "Batch finished: {} succeeded, {} failed, {} skipped",
        report.succeeded(),
        report.failed(),
        report.skipped()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_run_default_task_in_base_dir() -> anyhow::Result<()> {
        // 1. Setup
        let temp_dir = tempdir()?;
        fs::write(temp_dir.path().join("b.txt"), "Content B")?;
        fs::write(temp_dir.path().join("a.rs"), "fn a() {}")?;
        fs::write(temp_dir.path().join(".env"), "SECRET=1")?;

        let config = ConfigBuilder::new().base_dir(temp_dir.path()).build()?;
        let token = CancellationToken::new();

        // 2. Execute
        let report = run(&config, &token, None)?;

        // 3. Assert
        assert!(report.is_success());
        let output = fs::read_to_string(temp_dir.path().join("be-lumbung-mesari.txt"))?;
        assert!(output.contains("FILE: a.rs"));
        assert!(output.contains("FILE: b.txt"));
        assert!(!output.contains("SECRET=1"));
        Ok(())
    }

    #[test]
    fn test_run_replaces_previous_digest() -> anyhow::Result<()> {
        let temp_dir = tempdir()?;
        fs::write(temp_dir.path().join("a.txt"), "fresh")?;
        let output = temp_dir.path().join("be-lumbung-mesari.txt");
        fs::write(&output, "stale digest")?;

        let config = ConfigBuilder::new().base_dir(temp_dir.path()).build()?;
        let report = run(&config, &CancellationToken::new(), None)?;

        assert!(report.outcomes[0].deleted_existing);
        let content = fs::read_to_string(&output)?;
        assert!(!content.contains("stale digest"));
        assert!(content.contains("fresh"));
        Ok(())
    }

    #[test]
    fn test_execute_records_failure_and_continues() -> anyhow::Result<()> {
        let temp_dir = tempdir()?;
        let good = temp_dir.path().join("good");
        fs::create_dir(&good)?;
        fs::write(good.join("x.txt"), "x")?;

        let config = ConfigBuilder::new()
            .tasks(vec![
                TaskDescriptor::new(temp_dir.path().join("missing"), temp_dir.path().join("1.txt")),
                TaskDescriptor::new(&good, temp_dir.path().join("2.txt")),
            ])
            .build()?;
        let token = CancellationToken::new();
        let ingestor = DigestIngestor::new(config.ingest.clone(), token.clone());
        let mut console = Vec::new();

        let report = execute(&config, &ingestor, &mut console, &token, None)?;

        assert_eq!(report.failed(), 1);
        assert_eq!(report.succeeded(), 1);
        assert!(temp_dir.path().join("2.txt").exists());
        Ok(())
    }

    #[test]
    fn test_run_respects_cancellation() -> anyhow::Result<()> {
        let temp_dir = tempdir()?;
        fs::write(temp_dir.path().join("a.rs"), "fn a() {}")?;
        let config = ConfigBuilder::new().base_dir(temp_dir.path()).build()?;

        let token = CancellationToken::new();
        token.cancel();

        let result = run(&config, &token, None);
        assert!(matches!(result, Err(Error::Interrupted)));
        assert!(!temp_dir.path().join("be-lumbung-mesari.txt").exists());
        Ok(())
    }
}
