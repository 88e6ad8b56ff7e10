//! Discovering the files to batch.
//! - Only direct children of the work folder are considered (depth 1).
//! - Every entry that is not a directory is batched: regular files, symlinks
//!   (including dangling ones) and special files. A symlink pointing at a
//!   directory counts as a directory and stays where it is.
//! - A name that is not valid UTF-8 is an Io error; nothing has moved yet.
//!
//! Notes:
//! - Order is whatever the directory listing yields; it is not stable across
//!   filesystems and callers must not rely on it.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use super::helpers::io_error;

/// True for directories and for symlinks that resolve to one.
fn is_dir_like(entry: &DirEntry) -> bool {
    let ftype = entry.file_type();
    if ftype.is_dir() {
        return true;
    }
    ftype.is_symlink() && fs::metadata(entry.path()).is_ok_and(|m| m.is_dir())
}

/// List the non-directory entries directly inside `work_folder`, minus `excluded` names.
pub fn list_files(work_folder: &Path, excluded: &[String]) -> Result<Vec<String>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(work_folder)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(work_folder).to_path_buf();
            match e.into_io_error() {
                Some(ioe) => anyhow::Error::from(io_error("list work folder", &path, ioe)),
                None => anyhow::anyhow!("list work folder '{}': filesystem loop", path.display()),
            }
        })?;

        if is_dir_like(&entry) {
            debug!(path = %entry.path().display(), "Skipping directory");
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            return Err(io_error(
                "read file name",
                entry.path(),
                io::Error::new(io::ErrorKind::InvalidData, "file name is not valid UTF-8"),
            )
            .into());
        };

        if excluded.iter().any(|x| x == name) {
            debug!(name, "Excluded from batching");
            continue;
        }

        if !entry.file_type().is_file() {
            debug!(name, is_symlink = entry.file_type().is_symlink(), "Batching non-regular entry");
        }
        files.push(name.to_string());
    }

    debug!(count = files.len(), folder = %work_folder.display(), "Discovered files");
    Ok(files)
}
