//! The `digest_runner` prelude for convenient library usage.
//!
//! This module re-exports the most commonly used types, traits, and functions
//! from the `digest_runner` library.
//!
//! # Example
//!
//! ```
//! use digest_runner::prelude::*;
//! # fn main() -> Result<()> {
//!
//! // An empty batch is valid and reports success.
//! let config = ConfigBuilder::new().tasks(TaskList::new()).build()?;
//! let token = CancellationToken::new();
//! let mut console = Vec::new();
//! let report = execute(&config, &DigestIngestor::default(), &mut console, &token, None)?;
//! assert!(report.is_success());
//!
//! # Ok(())
//! # }
//! ```

pub use crate::cancellation::CancellationToken;
pub use crate::config::{Config, ConfigBuilder};
pub use crate::core_types::{ExcludePatterns, FileEntry, IngestSummary};
pub use crate::errors::{Error, Result};
pub use crate::ingest::{
    format_digest, is_likely_text_from_buffer, DigestIngestor, IngestOptions, Ingestor,
};
pub use crate::progress::{NoOpProgress, ProgressReporter};
pub use crate::runner::{run_tasks, BatchReport, FailurePolicy, TaskOutcome, TaskStatus};
pub use crate::task::{default_tasks, TaskDescriptor, TaskList};
pub use crate::{execute, run};
