//! Task descriptors and task lists.
//!
//! A task names a source directory to ingest and the file the digest is written
//! to. A `TaskList` keeps tasks in insertion order, which is also the order the
//! runner processes them in.

use crate::constants::DEFAULT_OUTPUT_FILE_NAME;
use crate::errors::{io_error_with_path, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// A single (source directory, output file) pair.
///
/// # Examples
///
/// ```
/// use digest_runner::task::TaskDescriptor;
///
/// let task = TaskDescriptor::new("/tmp/repo", "/tmp/out.txt");
/// assert_eq!(task.source.to_str(), Some("/tmp/repo"));
/// assert!(task.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDescriptor {
    /// Directory to ingest.
    pub source: PathBuf,
    /// Destination file for the digest.
    pub output: PathBuf,
}

impl TaskDescriptor {
    /// Creates a task from anything path-like.
    pub fn new(source: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output: output.into(),
        }
    }

    /// Checks that both paths are non-empty.
    pub fn validate(&self) -> Result<()> {
        if self.source.as_os_str().is_empty() {
            return Err(Error::InvalidTask(format!(
                "task with output '{}' has an empty source",
                self.output.display()
            )));
        }
        if self.output.as_os_str().is_empty() {
            return Err(Error::InvalidTask(format!(
                "task with source '{}' has an empty output",
                self.source.display()
            )));
        }
        Ok(())
    }
}

impl fmt::Display for TaskDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source.display(), self.output.display())
    }
}

/// An ordered list of tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<TaskDescriptor>,
}

impl TaskList {
    /// Creates an empty task list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a task; it will run after every task already in the list.
    pub fn push(&mut self, task: TaskDescriptor) {
        self.tasks.push(task);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TaskDescriptor> {
        self.tasks.iter()
    }

    /// Validates every task, returning the first failure.
    pub fn validate(&self) -> Result<()> {
        self.tasks.iter().try_for_each(TaskDescriptor::validate)
    }

    /// Reads a JSON array of `{"source": ..., "output": ...}` objects.
    ///
    /// # Errors
    /// Returns `Error::Io` if the file cannot be read, `Error::TaskFile` if it is
    /// not a valid task array, and `Error::InvalidTask` if any task has an empty path.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| io_error_with_path(e, path))?;
        let list: TaskList = serde_json::from_str(&raw).map_err(|source| Error::TaskFile {
            path: path.display().to_string(),
            source,
        })?;
        list.validate()?;
        log::debug!("Loaded {} task(s) from {}", list.len(), path.display());
        Ok(list)
    }
}

impl From<Vec<TaskDescriptor>> for TaskList {
    fn from(tasks: Vec<TaskDescriptor>) -> Self {
        Self { tasks }
    }
}

impl FromIterator<TaskDescriptor> for TaskList {
    fn from_iter<I: IntoIterator<Item = TaskDescriptor>>(iter: I) -> Self {
        Self {
            tasks: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a TaskDescriptor;
    type IntoIter = std::slice::Iter<'a, TaskDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

/// Builds the default task list for `base_dir`.
///
/// The list holds exactly one task: ingest `base_dir` into
/// `base_dir/be-lumbung-mesari.txt`.
///
/// # Examples
///
/// ```
/// use digest_runner::task::default_tasks;
/// use std::path::Path;
///
/// let tasks = default_tasks(Path::new("/srv/app"));
/// assert_eq!(tasks.len(), 1);
/// let task = tasks.iter().next().unwrap();
/// assert_eq!(task.output, Path::new("/srv/app/be-lumbung-mesari.txt"));
/// ```
pub fn default_tasks(base_dir: &Path) -> TaskList {
    TaskList::from(vec![TaskDescriptor::new(
        base_dir,
        base_dir.join(DEFAULT_OUTPUT_FILE_NAME),
    )])
}
