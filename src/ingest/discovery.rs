//! Finds the files that go into a digest.
use crate::cancellation::CancellationToken;
use crate::core_types::{ExcludePatterns, FileEntry};
use crate::errors::{Error, Result};
use crate::ingest::walker::build_walker;
use crate::ingest::IngestOptions;
use crossbeam_channel::unbounded;
use ignore::{DirEntry, WalkState};
use log::{debug, trace, warn};
use std::path::{Path, PathBuf};

/// Walks `root` in parallel and returns every file that passes the filters.
///
/// The returned vector is sorted by relative path; the final digest order is
/// decided later by the tree.
///
/// # Errors
/// Returns `Error::Interrupted` if the token is cancelled before or during the walk.
pub(super) fn discover_files(
    root: &Path,
    output: &Path,
    exclude: &ExcludePatterns,
    options: &IngestOptions,
    token: &CancellationToken,
) -> Result<Vec<FileEntry>> {
    if token.is_cancelled() {
        return Err(Error::Interrupted);
    }

    let walker = build_walker(root, output, exclude, options);
    let (tx, rx) = unbounded();

    let root_clone = root.to_path_buf();
    let max_file_size = options.max_file_size;
    let token_clone = token.clone();

    walker.run(move || {
        let tx = tx.clone();
        let token = token_clone.clone();
        let root = root_clone.clone();

        Box::new(move |entry_result| {
            if token.is_cancelled() {
                return WalkState::Quit;
            }
            if let Some(file_entry) = process_direntry(entry_result, &root, max_file_size) {
                if tx.send(file_entry).is_err() {
                    log::error!("Receiver dropped, quitting discovery walk.");
                    return WalkState::Quit;
                }
            }
            WalkState::Continue
        })
    });

    if token.is_cancelled() {
        return Err(Error::Interrupted);
    }

    let mut files: Vec<FileEntry> = rx.into_iter().collect();
    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    debug!("Discovery complete: {} file(s) under {}", files.len(), root.display());
    Ok(files)
}

/// Turns one walker entry into a `FileEntry`, or `None` if it is filtered out.
fn process_direntry(
    entry_result: std::result::Result<DirEntry, ignore::Error>,
    root: &Path,
    max_file_size: Option<u64>,
) -> Option<FileEntry> {
    let entry = match entry_result {
        Ok(entry) => entry,
        Err(ignore_error) => {
            warn!("Walker error: {}", ignore_error);
            return None;
        }
    };

    if !entry.file_type().is_some_and(|ft| ft.is_file()) {
        return None;
    }

    let absolute_path = entry.path().to_path_buf();
    let metadata = match entry.metadata() {
        Ok(metadata) => metadata,
        Err(e) => {
            warn!("Could not read metadata for {}: {}", absolute_path.display(), e);
            return None;
        }
    };

    if !passes_size_filter(metadata.len(), max_file_size) {
        debug!(
            "Skipping {} ({} bytes): larger than the size limit",
            absolute_path.display(),
            metadata.len()
        );
        return None;
    }

    let relative_path = absolute_path
        .strip_prefix(root)
        .map(PathBuf::from)
        .unwrap_or_else(|_| absolute_path.clone());
    trace!("Discovered {}", relative_path.display());

    Some(FileEntry {
        absolute_path,
        relative_path,
        size: metadata.len(),
        content: None,
        is_binary: false,
    })
}

/// Checks a file size against an optional limit (inclusive).
#[inline]
fn passes_size_filter(size: u64, max_file_size: Option<u64>) -> bool {
    max_file_size.map_or(true, |max| size <= max)
}
