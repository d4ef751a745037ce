// src/ingest/digest.rs

//! Formats the digest text: a directory tree followed by one block per file.

use crate::constants::{BINARY_PLACEHOLDER, CHARS_PER_TOKEN, FILE_SEPARATOR, TREE_HEADER};
use crate::core_types::FileEntry;
use crate::ingest::tree::DirNode;
use std::collections::HashMap;
use std::path::Path;

/// Builds the complete digest for `files` under a root called `root_name`.
///
/// Layout:
///
/// ```text
/// Directory structure:
/// └── repo/
///     └── a.txt
///
/// ================================================
/// FILE: a.txt
/// ================================================
/// <content>
///
/// ```
///
/// # Examples
///
/// ```
/// use digest_runner::core_types::FileEntry;
/// use digest_runner::ingest::format_digest;
/// use std::path::PathBuf;
///
/// let file = FileEntry {
///     relative_path: PathBuf::from("a.txt"),
///     content: Some("hello".to_string()),
///     ..Default::default()
/// };
/// let digest = format_digest("repo", &[file]);
/// assert!(digest.starts_with("Directory structure:\n└── repo/\n    └── a.txt\n\n"));
/// let separator = "================================================";
/// assert!(digest.ends_with(&format!("FILE: a.txt\n{separator}\nhello\n\n")));
/// ```
pub fn format_digest(root_name: &str, files: &[FileEntry]) -> String {
    let tree = DirNode::from_paths(files.iter().map(|f| f.relative_path.as_path()));
    let by_path: HashMap<&Path, &FileEntry> = files
        .iter()
        .map(|f| (f.relative_path.as_path(), f))
        .collect();

    let mut out = String::new();
    out.push_str(TREE_HEADER);
    out.push('\n');
    out.push_str(&tree.render(root_name));
    out.push('\n');

    for path in tree.ordered_files() {
        let Some(entry) = by_path.get(path.as_path()) else {
            continue;
        };
        write_file_block(&mut out, entry);
    }
    out
}

fn write_file_block(out: &mut String, entry: &FileEntry) {
    let display_path = entry.relative_path.to_string_lossy().replace('\\', "/");
    out.push_str(FILE_SEPARATOR);
    out.push('\n');
    out.push_str("FILE: ");
    out.push_str(&display_path);
    out.push('\n');
    out.push_str(FILE_SEPARATOR);
    out.push('\n');
    match (&entry.content, entry.is_binary) {
        (_, true) => out.push_str(BINARY_PLACEHOLDER),
        (Some(content), false) => out.push_str(content),
        (None, false) => {
            log::warn!("Content not available for file: {}", display_path);
        }
    }
    out.push_str("\n\n");
}

/// Rough token estimate: one token per four characters, rounded up.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(CHARS_PER_TOKEN)
}
