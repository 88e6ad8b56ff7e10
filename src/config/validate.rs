//! Config validation logic.
//! Checks batch size and folder naming, and resolves the work folder to an
//! absolute, readable directory without touching the process working directory.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

use crate::errors::BatchMoverError;

use super::types::Config;

impl Config {
    /// Validate batch size and folder naming.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            error!(batch_size = self.batch_size, "Batch size must be positive");
            return Err(BatchMoverError::Configuration(
                "batch size must be greater than 0".into(),
            )
            .into());
        }
        if self.folder_prefix.contains(['/', '\\']) {
            error!(prefix = %self.folder_prefix, "Folder prefix contains a path separator");
            return Err(BatchMoverError::Configuration(format!(
                "folder prefix must not contain a path separator: '{}'",
                self.folder_prefix
            ))
            .into());
        }
        if self.folder_prefix.is_empty() {
            debug!("Empty folder prefix; batch folders will be bare numbers");
        }
        Ok(())
    }
}

/// Resolve the work folder to an absolute directory path.
///
/// - `None` means the current directory.
/// - The path must exist, be a directory and be readable (NotFound otherwise).
pub fn resolve_work_folder(work_folder: Option<&Path>) -> Result<PathBuf> {
    let raw = match work_folder {
        Some(p) => p.to_path_buf(),
        None => std::env::current_dir().context("Cannot determine the current directory")?,
    };

    let resolved = dunce::canonicalize(&raw).map_err(|e| {
        debug!(path = %raw.display(), error = %e, "canonicalize failed");
        BatchMoverError::NotFound(raw.clone())
    })?;

    if !resolved.is_dir() {
        error!("Work folder is not a directory: {}", resolved.display());
        return Err(BatchMoverError::NotFound(resolved).into());
    }

    // readability probe
    if let Err(e) = fs::read_dir(&resolved) {
        error!(error = %e, "Cannot read work folder {}", resolved.display());
        return Err(BatchMoverError::NotFound(resolved).into());
    }

    debug!("Work folder resolved: {}", resolved.display());
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn kind_of(err: &anyhow::Error) -> &'static str {
        err.downcast_ref::<BatchMoverError>()
            .map(BatchMoverError::kind)
            .unwrap_or("untyped")
    }

    #[test]
    fn zero_batch_size_is_configuration_error() {
        let cfg = Config {
            batch_size: 0,
            ..Config::default()
        };
        let err = cfg.validate().unwrap_err();
        assert_eq!(kind_of(&err), "configuration");
    }

    #[test]
    fn prefix_with_separator_is_rejected() {
        let cfg = Config {
            folder_prefix: "nested/folder-".into(),
            ..Config::default()
        };
        let err = cfg.validate().unwrap_err();
        assert_eq!(kind_of(&err), "configuration");
    }

    #[test]
    fn empty_prefix_is_accepted() {
        let cfg = Config {
            folder_prefix: String::new(),
            ..Config::default()
        };
        cfg.validate().expect("empty prefix validates");
    }

    #[test]
    fn defaults_are_valid() {
        Config::default().validate().expect("defaults validate");
    }

    #[test]
    fn missing_folder_is_not_found() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = resolve_work_folder(Some(&missing)).unwrap_err();
        assert_eq!(kind_of(&err), "not_found");
    }

    #[test]
    fn file_is_not_a_work_folder() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "x").unwrap();
        let err = resolve_work_folder(Some(&file)).unwrap_err();
        assert_eq!(kind_of(&err), "not_found");
    }

    #[test]
    fn resolves_to_absolute_path() {
        let dir = tempdir().unwrap();
        let resolved = resolve_work_folder(Some(dir.path())).unwrap();
        assert!(resolved.is_absolute());
        assert_eq!(resolved, dunce::canonicalize(dir.path()).unwrap());
    }
}
