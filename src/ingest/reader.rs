//! Reads the content of discovered files.

use crate::cancellation::CancellationToken;
use crate::core_types::FileEntry;
use crate::errors::{io_error_with_path, Error, Result};
use crate::ingest::text_detection::is_likely_text_from_buffer;
use log::debug;
use rayon::prelude::*;
use std::fs;

/// Reads every file in parallel, filling in `content` or flagging it as binary.
///
/// Input order is preserved.
///
/// # Errors
/// Returns the first I/O error hit while reading, or `Error::Interrupted` if the
/// token is cancelled.
pub(super) fn read_contents(
    files: Vec<FileEntry>,
    token: &CancellationToken,
) -> Result<Vec<FileEntry>> {
    files
        .into_par_iter()
        .map(|mut entry| {
            if token.is_cancelled() {
                return Err(Error::Interrupted);
            }
            let bytes = fs::read(&entry.absolute_path)
                .map_err(|e| io_error_with_path(e, &entry.absolute_path))?;

            if is_likely_text_from_buffer(&bytes) {
                let text = String::from_utf8_lossy(&bytes);
                entry.content = Some(text.trim_start_matches('\u{feff}').to_string());
            } else {
                debug!("Binary file: {}", entry.relative_path.display());
                entry.is_binary = true;
            }
            Ok(entry)
        })
        .collect()
}
