//! Batch folder creation and file relocation.
//! - Folders are created with `create_dir`, never `create_dir_all`, so an entry
//!   that appeared under the same name surfaces as a conflict.
//! - Files are renamed within the same volume; there is no copy fallback.
//! - On Unix, best-effort fsync of a batch folder once it is filled.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::BatchMoverError;

use super::helpers::io_error_with_help;

/// True if anything (file, folder, dangling symlink) already sits at `path`.
pub fn entry_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Create one batch folder. An existing entry with that name is a Conflict.
pub fn create_batch_folder(path: &Path) -> Result<()> {
    if entry_exists(path) {
        return Err(BatchMoverError::Conflict(path.to_path_buf()).into());
    }
    match fs::create_dir(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            Err(BatchMoverError::Conflict(path.to_path_buf()).into())
        }
        Err(e) => Err(io_error_with_help("create batch folder", path)(e)),
    }
}

/// Rename `work_folder/name` to `dest_dir/name`, refusing to overwrite.
pub fn relocate_file(work_folder: &Path, dest_dir: &Path, name: &str) -> Result<PathBuf> {
    let src = work_folder.join(name);
    let dst = dest_dir.join(name);

    if entry_exists(&dst) {
        return Err(BatchMoverError::Conflict(dst).into());
    }

    fs::rename(&src, &dst).map_err(io_error_with_help("rename file", &src))?;
    debug!(src = %src.display(), dest = %dst.display(), "Moved file");
    Ok(dst)
}

#[cfg(unix)]
pub fn fsync_dir(dir: &Path) -> io::Result<()> {
    let f = fs::File::open(dir)?;
    f.sync_all()
}

#[cfg(windows)]
pub fn fsync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}
