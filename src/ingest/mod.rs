//! The ingestion capability: turning a directory tree into a text digest.
//!
//! The runner only talks to the [`Ingestor`] trait. [`DigestIngestor`] is the
//! bundled implementation; it works in four steps:
//! 1.  **Walk**: list the files under the source, honoring `.gitignore`,
//!     the caller's exclusion globs and a fixed set of default ignores.
//! 2.  **Read**: load file contents in parallel and flag binary files.
//! 3.  **Render**: build the directory tree and the per-file content blocks.
//! 4.  **Write**: create the output file and write the digest to it.

use crate::cancellation::CancellationToken;
use crate::constants::DEFAULT_MAX_FILE_SIZE;
use crate::core_types::{ExcludePatterns, IngestSummary};
use crate::errors::{io_error_with_path, Error, Result};
use log::{debug, info};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::instrument;

pub mod digest;
mod discovery;
mod reader;
pub mod text_detection;
pub mod tree;
mod walker;

pub use digest::format_digest;
pub use text_detection::is_likely_text_from_buffer;

/// Produces a text digest of `source` at `output`.
///
/// Implementations own every detail of traversal, filtering and formatting.
/// The only contract is: on success a file exists at `output`.
pub trait Ingestor {
    /// Ingests `source`, leaving out anything matching `exclude`, and writes the
    /// digest to `output`.
    fn ingest(
        &self,
        source: &Path,
        exclude: &ExcludePatterns,
        output: &Path,
    ) -> Result<IngestSummary>;
}

/// Options for the bundled [`DigestIngestor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOptions {
    /// Files larger than this many bytes are left out. `None` disables the limit.
    pub max_file_size: Option<u64>,
    /// Whether to respect `.gitignore`, `.ignore`, and other VCS ignore files.
    pub use_gitignore: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            max_file_size: Some(DEFAULT_MAX_FILE_SIZE),
            use_gitignore: true,
        }
    }
}

/// The bundled ingestor: walks a directory and writes a tree plus file contents.
///
/// # Examples
///
/// ```
/// use digest_runner::core_types::ExcludePatterns;
/// use digest_runner::ingest::{DigestIngestor, IngestOptions, Ingestor};
/// use digest_runner::CancellationToken;
/// use std::fs;
/// use tempfile::tempdir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let source = tempdir()?;
/// fs::write(source.path().join("main.rs"), "fn main() {}")?;
/// fs::write(source.path().join("secrets.env"), "TOKEN=1")?;
/// let out_dir = tempdir()?;
/// let output = out_dir.path().join("digest.txt");
///
/// let ingestor = DigestIngestor::new(IngestOptions::default(), CancellationToken::new());
/// let summary = ingestor.ingest(source.path(), &ExcludePatterns::env_files(), &output)?;
///
/// assert_eq!(summary.files_analyzed, 1);
/// let digest = fs::read_to_string(&output)?;
/// assert!(digest.contains("FILE: main.rs"));
/// assert!(!digest.contains("secrets.env"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct DigestIngestor {
    options: IngestOptions,
    token: CancellationToken,
}

impl DigestIngestor {
    pub fn new(options: IngestOptions, token: CancellationToken) -> Self {
        Self { options, token }
    }
}

impl Ingestor for DigestIngestor {
    #[instrument(skip_all, fields(source = %source.display(), output = %output.display()))]
    fn ingest(
        &self,
        source: &Path,
        exclude: &ExcludePatterns,
        output: &Path,
    ) -> Result<IngestSummary> {
        let root = resolve_source(source)?;
        let output_path = resolve_output(output)?;
        debug!(
            "Ingesting {} into {} (excluding {:?})",
            root.display(),
            output_path.display(),
            exclude.iter().collect::<Vec<_>>()
        );

        let discovered =
            discovery::discover_files(&root, &output_path, exclude, &self.options, &self.token)?;
        let files = reader::read_contents(discovered, &self.token)?;

        let root_name = root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());
        let rendered = format_digest(&root_name, &files);

        let file = File::create(&output_path).map_err(|e| io_error_with_path(e, &output_path))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(rendered.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|e| io_error_with_path(e, &output_path))?;

        let summary = IngestSummary {
            output: output_path,
            files_analyzed: files.len(),
            total_bytes: files.iter().map(|f| f.size).sum(),
            estimated_tokens: digest::estimate_tokens(&rendered),
        };
        info!(
            "Wrote digest of {} file(s) (~{} tokens) to {}",
            summary.files_analyzed,
            summary.estimated_tokens,
            summary.output.display()
        );
        Ok(summary)
    }
}

/// Canonicalizes the source and checks that it is a directory.
fn resolve_source(source: &Path) -> Result<PathBuf> {
    let resolved = source
        .canonicalize()
        .map_err(|_| Error::SourceNotFound(source.display().to_string()))?;
    if !resolved.is_dir() {
        return Err(Error::SourceNotFound(source.display().to_string()));
    }
    Ok(resolved)
}

/// Makes the output path absolute by canonicalizing its parent directory.
///
/// The output file itself usually does not exist yet, so only the parent is
/// resolved. A missing parent is reported as an I/O error on that parent.
fn resolve_output(output: &Path) -> Result<PathBuf> {
    let file_name = output.file_name().ok_or_else(|| {
        Error::InvalidTask(format!("output '{}' has no file name", output.display()))
    })?;
    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let parent = fs::canonicalize(parent).map_err(|e| io_error_with_path(e, parent))?;
    Ok(parent.join(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn ingestor() -> DigestIngestor {
        DigestIngestor::new(IngestOptions::default(), CancellationToken::new())
    }

    #[test]
    fn test_ingest_writes_tree_and_contents() -> anyhow::Result<()> {
        let source = tempdir()?;
        fs::create_dir(source.path().join("src"))?;
        fs::write(source.path().join("README.md"), "# Title\n")?;
        fs::write(source.path().join("src").join("lib.rs"), "pub fn a() {}\n")?;
        let out_dir = tempdir()?;
        let output = out_dir.path().join("out.txt");

        let summary = ingestor().ingest(source.path(), &ExcludePatterns::env_files(), &output)?;

        assert_eq!(summary.files_analyzed, 2);
        assert_eq!(summary.total_bytes, 8 + 14);
        let digest = fs::read_to_string(&output)?;
        assert!(digest.starts_with("Directory structure:\n└── "));
        assert!(digest.contains("    ├── README.md\n    └── src/\n        └── lib.rs\n"));
        assert!(digest.contains("FILE: README.md\n"));
        assert!(digest.contains("FILE: src/lib.rs\n"));
        let readme_pos = digest.find("FILE: README.md").unwrap();
        let lib_pos = digest.find("FILE: src/lib.rs").unwrap();
        assert!(readme_pos < lib_pos);
        Ok(())
    }

    #[test]
    fn test_ingest_excludes_env_files_at_any_depth() -> anyhow::Result<()> {
        let source = tempdir()?;
        fs::create_dir(source.path().join("config"))?;
        fs::write(source.path().join(".env"), "SECRET=1")?;
        fs::write(source.path().join("config").join("prod.env"), "SECRET=2")?;
        fs::write(source.path().join("config").join("app.toml"), "a = 1")?;
        let out_dir = tempdir()?;
        let output = out_dir.path().join("out.txt");

        let summary = ingestor().ingest(source.path(), &ExcludePatterns::env_files(), &output)?;

        assert_eq!(summary.files_analyzed, 1);
        let digest = fs::read_to_string(&output)?;
        assert!(!digest.contains("SECRET"));
        assert!(!digest.contains(".env"));
        assert!(digest.contains("FILE: config/app.toml"));
        Ok(())
    }

    #[test]
    fn test_ingest_skips_output_inside_source() -> anyhow::Result<()> {
        let source = tempdir()?;
        fs::write(source.path().join("a.txt"), "A")?;
        let output = source.path().join("digest.txt");

        ingestor().ingest(source.path(), &ExcludePatterns::env_files(), &output)?;
        // Ingest a second time while the previous digest is still present.
        let summary = ingestor().ingest(source.path(), &ExcludePatterns::env_files(), &output)?;

        assert_eq!(summary.files_analyzed, 1);
        let digest = fs::read_to_string(&output)?;
        assert!(!digest.contains("FILE: digest.txt"));
        Ok(())
    }

    #[test]
    fn test_ingest_missing_source() -> anyhow::Result<()> {
        let out_dir = tempdir()?;
        let output = out_dir.path().join("out.txt");
        let result = ingestor().ingest(
            Path::new("no_such_source_dir_for_digest"),
            &ExcludePatterns::env_files(),
            &output,
        );
        assert!(matches!(result, Err(Error::SourceNotFound(_))));
        assert!(!output.exists());
        Ok(())
    }

    #[test]
    fn test_ingest_source_is_a_file() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let file = temp.path().join("plain.txt");
        fs::write(&file, "x")?;
        let result = ingestor().ingest(
            &file,
            &ExcludePatterns::env_files(),
            &temp.path().join("o.txt"),
        );
        assert!(matches!(result, Err(Error::SourceNotFound(_))));
        Ok(())
    }

    #[test]
    fn test_ingest_missing_output_parent() -> anyhow::Result<()> {
        let source = tempdir()?;
        fs::write(source.path().join("a.txt"), "A")?;
        let output = source.path().join("missing").join("out.txt");
        let result = ingestor().ingest(source.path(), &ExcludePatterns::env_files(), &output);
        assert!(matches!(result, Err(Error::Io { .. })));
        Ok(())
    }

    #[test]
    fn test_ingest_respects_cancellation() -> anyhow::Result<()> {
        let source = tempdir()?;
        fs::write(source.path().join("a.txt"), "A")?;
        let out_dir = tempdir()?;
        let token = CancellationToken::new();
        token.cancel();

        let ingestor = DigestIngestor::new(IngestOptions::default(), token);
        let result = ingestor.ingest(
            source.path(),
            &ExcludePatterns::env_files(),
            &out_dir.path().join("out.txt"),
        );
        assert!(matches!(result, Err(Error::Interrupted)));
        Ok(())
    }

    #[test]
    fn test_ingest_ignores_ancestor_gitignore() -> anyhow::Result<()> {
        let outer = tempdir()?;
        fs::write(outer.path().join(".gitignore"), "*.rs\n")?;
        let source = outer.path().join("proj");
        fs::create_dir(&source)?;
        fs::write(source.join("main.rs"), "fn main() {}")?;
        let out_dir = tempdir()?;
        let output = out_dir.path().join("out.txt");

        let summary = ingestor().ingest(&source, &ExcludePatterns::env_files(), &output)?;

        assert_eq!(summary.files_analyzed, 1);
        assert!(fs::read_to_string(&output)?.contains("FILE: main.rs"));
        Ok(())
    }

    #[test]
    fn test_ingest_still_honors_source_gitignore() -> anyhow::Result<()> {
        let source = tempdir()?;
        fs::write(source.path().join(".gitignore"), "*.log\n")?;
        fs::write(source.path().join("run.log"), "noise")?;
        fs::write(source.path().join("main.rs"), "fn main() {}")?;
        let out_dir = tempdir()?;
        let output = out_dir.path().join("out.txt");

        ingestor().ingest(source.path(), &ExcludePatterns::env_files(), &output)?;

        let digest = fs::read_to_string(&output)?;
        assert!(digest.contains("FILE: main.rs"));
        assert!(!digest.contains("FILE: run.log"));
        Ok(())
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_ingest_keeps_non_utf8_names_apart() -> anyhow::Result<()> {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let source = tempdir()?;
        fs::write(source.path().join(OsStr::from_bytes(b"a\xff.txt")), "ONE")?;
        fs::write(source.path().join(OsStr::from_bytes(b"a\xfe.txt")), "TWO")?;
        let out_dir = tempdir()?;
        let output = out_dir.path().join("out.txt");

        let summary = ingestor().ingest(source.path(), &ExcludePatterns::env_files(), &output)?;

        assert_eq!(summary.files_analyzed, 2);
        let digest = fs::read_to_string(&output)?;
        assert!(digest.contains("ONE"));
        assert!(digest.contains("TWO"));
        Ok(())
    }
}
