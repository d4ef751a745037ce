//! Defines the `Config` struct used to drive a batch run.
//!
//! A `Config` is built with [`ConfigBuilder`], either from parsed CLI
//! arguments or programmatically. Once built it holds a validated task list,
//! so the runner never needs to look at the environment.

use crate::ingest::IngestOptions;
use crate::runner::FailurePolicy;
use crate::task::TaskList;

pub use builder::ConfigBuilder;
mod builder;
mod builder_logic;
mod parsing;
pub mod path_resolve;

/// Everything a batch run needs.
#[derive(Debug, Clone)]
pub struct Config {
    /// The tasks to run, in order.
    pub tasks: TaskList,
    /// Whether a failed task stops the batch.
    pub failure_policy: FailurePolicy,
    /// Options for the bundled ingestor.
    pub ingest: IngestOptions,
}
