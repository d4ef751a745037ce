//! Defines application-specific error types.
//!
//! This module provides the `Error` enum, which categorizes the failures a batch
//! run can hit, offering more context than generic I/O or `anyhow` errors.

use thiserror::Error;

/// Errors used throughout `digest-runner`.
#[derive(Error, Debug)]
pub enum Error {
    // --- I/O Errors ---
    /// Error occurring during file or directory access (read, write, delete, metadata).
    #[error("I/O error accessing path '{path}': {source}")]
    Io {
        /// The path that caused the I/O error.
        path: String,
        /// The underlying `std::io::Error`.
        #[source]
        source: std::io::Error,
    },

    // --- Task Errors ---
    /// A task descriptor is missing its source or output path.
    #[error("Invalid task: {0}")]
    InvalidTask(String),

    /// A task file could not be parsed.
    #[error("Failed to parse task file '{path}': {source}")]
    TaskFile {
        /// The path of the task file.
        path: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    // --- Ingestion Errors ---
    /// The source of an ingestion does not exist or is not a directory.
    #[error("Source directory not found: '{0}'")]
    SourceNotFound(String),

    /// An ingestor reported a failure that is not an I/O error.
    #[error("Ingestion of '{source_path}' failed: {message}")]
    Ingest {
        /// The source directory being ingested.
        source_path: String,
        /// Description of the failure.
        message: String,
    },

    // --- Configuration Errors ---
    /// Invalid configuration settings or combinations.
    #[error("Invalid configuration: {0}")]
    Config(String),

    // --- Signal Handling ---
    /// The operation was cancelled by the user (e.g., Ctrl+C).
    #[error("Operation cancelled by user (Ctrl+C)")]
    Interrupted,
}

/// A `Result` alias using the crate's `Error` type.
pub type Result<T> = std::result::Result<T, Error>;

/// Helper function to create an `Error::Io` with path context.
///
/// # Arguments
/// * `source` - The original `std::io::Error`.
/// * `path` - The path associated with the error, convertible to `AsRef<std::path::Path>`.
pub fn io_error_with_path<P: AsRef<std::path::Path>>(source: std::io::Error, path: P) -> Error {
    Error::Io {
        path: path.as_ref().display().to_string(),
        source,
    }
}
