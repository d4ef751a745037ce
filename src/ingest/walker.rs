use crate::constants::DEFAULT_IGNORE_PATTERNS;
use crate::core_types::ExcludePatterns;
use crate::ingest::IngestOptions;
use glob::Pattern;
use ignore::{WalkBuilder, WalkParallel};
use log::{debug, trace, warn};
use std::path::Path;

/// Configures and builds the parallel walker for one ingestion.
///
/// `root` must already be canonical, and `output` must be the canonical path of
/// the digest file so it can be recognized and skipped when it lives inside
/// `root`.
pub(super) fn build_walker(
    root: &Path,
    output: &Path,
    exclude: &ExcludePatterns,
    options: &IngestOptions,
) -> WalkParallel {
    let mut walker_builder = WalkBuilder::new(root);

    walker_builder.standard_filters(options.use_gitignore);
    // Dotfiles are part of a digest; .git and friends are removed by the default globs.
    walker_builder.hidden(false);
    // Process .gitignore files even when the source is not a git checkout.
    walker_builder.require_git(false);
    // Only ignore files at or below the source count; ancestors are unrelated.
    walker_builder.parents(false);
    walker_builder.follow_links(false);
    debug!(
        "Configuring WalkBuilder: gitignore {}.",
        if options.use_gitignore { "enabled" } else { "disabled" }
    );

    let globs = compile_globs(
        exclude
            .iter()
            .chain(DEFAULT_IGNORE_PATTERNS.iter().copied()),
    );
    debug!("Compiled {} exclusion glob(s).", globs.len());

    let root_clone = root.to_path_buf();
    let output_clone = output.to_path_buf();
    walker_builder.filter_entry(move |entry| {
        if entry.depth() == 0 {
            return true;
        }
        let path = entry.path();
        if path == output_clone {
            trace!("Skipping the digest output itself: {:?}", path);
            return false;
        }

        let file_name = entry.file_name().to_string_lossy();
        let relative_path = path.strip_prefix(&root_clone).unwrap_or(path);
        if globs
            .iter()
            .any(|glob| glob.matches(&file_name) || glob.matches_path(relative_path))
        {
            trace!("Skipping {:?}: matches an exclusion glob", relative_path);
            return false;
        }
        true
    });

    walker_builder.build_parallel()
}

/// Compiles glob patterns, skipping (and logging) any that are invalid.
fn compile_globs<'a>(patterns: impl Iterator<Item = &'a str>) -> Vec<Pattern> {
    patterns
        .filter_map(|p| match Pattern::new(p) {
            Ok(glob) => Some(glob),
            Err(e) => {
                warn!("Invalid exclusion glob pattern '{}': {}", p, e);
                None
            }
        })
        .collect()
}
