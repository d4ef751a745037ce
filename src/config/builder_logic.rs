// src/config/builder_logic.rs

use super::path_resolve::resolve_base_dir;
use super::ConfigBuilder;
use crate::errors::{Error, Result};
use crate::task::{default_tasks, TaskList};
use std::path::PathBuf;

/// Validates combinations of options on the `ConfigBuilder`.
pub(super) fn validate_builder_options(builder: &ConfigBuilder) -> Result<()> {
    if builder.tasks.is_some() && builder.tasks_file.is_some() {
        return Err(Error::Config(
            "an explicit task list and --tasks <FILE> cannot be combined".to_string(),
        ));
    }
    if builder.base_dir.is_some() && (builder.tasks.is_some() || builder.tasks_file.is_some()) {
        return Err(Error::Config(
            "--base-dir only applies to the default task and cannot be combined with a task list"
                .to_string(),
        ));
    }
    Ok(())
}

/// Picks the task list: explicit tasks, then a task file, then the default list.
pub(super) fn determine_tasks(
    tasks: Option<TaskList>,
    tasks_file: Option<PathBuf>,
    base_dir: Option<PathBuf>,
) -> Result<TaskList> {
    if let Some(tasks) = tasks {
        tasks.validate()?;
        return Ok(tasks);
    }
    if let Some(path) = tasks_file {
        return TaskList::from_json_file(&path);
    }
    let base = resolve_base_dir(base_dir.as_deref())?;
    log::debug!("Using default task list for {}", base.display());
    Ok(default_tasks(&base))
}
