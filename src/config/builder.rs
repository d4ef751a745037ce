// src/config/builder.rs

use super::{
    builder_logic::{determine_tasks, validate_builder_options},
    parsing::parse_max_size,
    Config,
};
use crate::cli::Cli;
use crate::errors::Result;
use crate::ingest::IngestOptions;
use crate::runner::FailurePolicy;
use crate::task::TaskList;
use std::path::PathBuf;

/// Builds a [`Config`] step by step.
///
/// Every setter is optional. With nothing set, `build()` produces the default
/// task list for the current working directory.
///
/// # Examples
///
/// ```
/// use digest_runner::config::ConfigBuilder;
/// use digest_runner::runner::FailurePolicy;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let temp = tempfile::tempdir()?;
/// let config = ConfigBuilder::new()
///     .base_dir(temp.path())
///     .fail_fast(true)
///     .max_size("1MiB")
///     .build()?;
///
/// assert_eq!(config.tasks.len(), 1);
/// assert_eq!(config.failure_policy, FailurePolicy::FailFast);
/// assert_eq!(config.ingest.max_file_size, Some(1024 * 1024));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    pub(super) tasks: Option<TaskList>,
    pub(super) tasks_file: Option<PathBuf>,
    pub(super) base_dir: Option<PathBuf>,
    pub(super) fail_fast: Option<bool>,
    pub(super) max_size: Option<String>,
    pub(super) no_gitignore: Option<bool>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a builder from parsed command-line arguments.
    pub fn from_cli(cli: Cli) -> Self {
        Self {
            tasks: None,
            tasks_file: cli.tasks_file.map(PathBuf::from),
            base_dir: cli.base_dir.map(PathBuf::from),
            fail_fast: Some(cli.fail_fast),
            max_size: cli.max_size,
            no_gitignore: Some(cli.no_gitignore),
        }
    }

    /// Uses an explicit task list instead of the default one.
    pub fn tasks(mut self, tasks: impl Into<TaskList>) -> Self {
        self.tasks = Some(tasks.into());
        self
    }

    /// Loads the task list from a JSON file at build time.
    pub fn tasks_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.tasks_file = Some(path.into());
        self
    }

    /// Directory the default task ingests (and writes its digest into).
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = Some(fail_fast);
        self
    }

    /// Maximum size of a file included in a digest, e.g. `"512k"` or `"2MiB"`.
    pub fn max_size(mut self, size: impl Into<String>) -> Self {
        self.max_size = Some(size.into());
        self
    }

    pub fn no_gitignore(mut self, no_gitignore: bool) -> Self {
        self.no_gitignore = Some(no_gitignore);
        self
    }

    /// Validates the options and produces a `Config`.
    ///
    /// # Errors
    /// Returns `Error::Config` for conflicting options or an invalid size, and
    /// propagates task loading and validation errors.
    pub fn build(self) -> Result<Config> {
        validate_builder_options(&self)?;

        let defaults = IngestOptions::default();
        let max_file_size = parse_max_size(self.max_size.as_deref())?.or(defaults.max_file_size);
        let ingest = IngestOptions {
            max_file_size,
            use_gitignore: !self.no_gitignore.unwrap_or(false),
        };
        let failure_policy = if self.fail_fast.unwrap_or(false) {
            FailurePolicy::FailFast
        } else {
            FailurePolicy::Continue
        };

        let tasks = determine_tasks(self.tasks, self.tasks_file, self.base_dir)?;
        log::debug!(
            "Built config: {} task(s), policy {:?}, {:?}",
            tasks.len(),
            failure_policy,
            ingest
        );

        Ok(Config {
            tasks,
            failure_policy,
            ingest,
        })
    }
}
