// src/config/path_resolve.rs

use crate::errors::{Error, Result};
use std::path::{Path, PathBuf};

/// Resolves the base directory of the default task to an absolute, canonical path.
///
/// `None` means the current working directory.
pub fn resolve_base_dir(base_dir: Option<&Path>) -> Result<PathBuf> {
    let requested = match base_dir {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().map_err(|e| {
            Error::Config(format!("Failed to determine current directory: {}", e))
        })?,
    };
    let resolved = requested.canonicalize().map_err(|e| {
        Error::Config(format!(
            "Failed to resolve base directory '{}': {}",
            requested.display(),
            e
        ))
    })?;
    if !resolved.is_dir() {
        return Err(Error::Config(format!(
            "Base directory '{}' is not a directory",
            requested.display()
        )));
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_existing_dir() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let resolved = resolve_base_dir(Some(temp.path()))?;
        assert!(resolved.is_absolute());
        assert!(resolved.is_dir());
        Ok(())
    }

    #[test]
    fn test_resolve_defaults_to_cwd() -> anyhow::Result<()> {
        let resolved = resolve_base_dir(None)?;
        assert_eq!(resolved, std::env::current_dir()?.canonicalize()?);
        Ok(())
    }

    #[test]
    fn test_resolve_file_is_rejected() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let file = temp.path().join("plain.txt");
        fs::write(&file, "x")?;
        let result = resolve_base_dir(Some(&file));
        assert!(result.unwrap_err().to_string().contains("is not a directory"));
        Ok(())
    }

    #[test]
    fn test_resolve_non_existent_path() {
        let result = resolve_base_dir(Some(Path::new("non_existent_base_dir_for_digest")));
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to resolve base directory"));
    }
}
