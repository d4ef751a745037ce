//! Defines core data structures shared by the runner and the ingestor.
//!
//! `ExcludePatterns` is what the runner hands to an ingestor, `FileEntry` is what
//! the bundled ingestor discovers, and `IngestSummary` is what comes back.

use crate::constants::ENV_EXCLUDE_PATTERN;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// A set of glob patterns naming files an ingestion must leave out.
///
/// Patterns are kept in a sorted set, so equality does not depend on
/// insertion order.
///
/// # Examples
///
/// ```
/// use digest_runner::core_types::ExcludePatterns;
///
/// let patterns = ExcludePatterns::env_files();
/// assert_eq!(patterns.len(), 1);
/// assert!(patterns.contains("*.env"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludePatterns {
    patterns: BTreeSet<String>,
}

impl ExcludePatterns {
    /// The rule every task is ingested with: skip files with a `.env` extension.
    pub fn env_files() -> Self {
        [ENV_EXCLUDE_PATTERN].into_iter().collect()
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.patterns.contains(pattern)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ExcludePatterns {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            patterns: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// A file found while walking a source directory.
///
/// `content` is `None` until the file has been read, and stays `None` for
/// binary files.
#[derive(Debug, Clone, Default)]
pub struct FileEntry {
    /// The absolute path to the file on the filesystem.
    pub absolute_path: PathBuf,
    /// The path relative to the ingested source directory.
    pub relative_path: PathBuf,
    /// Size in bytes, from metadata.
    pub size: u64,
    /// The file's text, once read.
    pub content: Option<String>,
    /// Set when the file was detected as binary while reading.
    pub is_binary: bool,
}

/// What an ingestion produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// The file the digest was written to.
    pub output: PathBuf,
    /// Number of files listed in the digest.
    pub files_analyzed: usize,
    /// Total bytes of the files listed in the digest.
    pub total_bytes: u64,
    /// Rough token count of the written digest.
    pub estimated_tokens: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_files_is_exactly_one_pattern() {
        let patterns = ExcludePatterns::env_files();
        assert_eq!(patterns.iter().collect::<Vec<_>>(), vec!["*.env"]);
    }

    #[test]
    fn test_equality_ignores_order() {
        let a: ExcludePatterns = ["*.log", "*.env"].into_iter().collect();
        let b: ExcludePatterns = vec!["*.env".to_string(), "*.log".to_string()]
            .into_iter()
            .collect();
        assert_eq!(a, b);
        assert_ne!(a, ExcludePatterns::env_files());
    }
}
