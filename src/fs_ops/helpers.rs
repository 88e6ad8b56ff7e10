//! I/O helper utilities.
//!
//! Provides a small adapter to enrich io::Error with actionable context/hints,
//! usable with map_err in anyhow::Result code paths.
//!
//! Usage:
//!   fs::create_dir(dir).map_err(io_error_with_help("create batch folder", dir))?;

use std::io;
use std::path::Path;

use crate::errors::BatchMoverError;

/// Platform-aware hint for an io::Error, or an empty string when none applies.
fn hint_for(e: &io::Error) -> String {
    let mut hint = String::new();

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            match code {
                libc::EACCES | libc::EPERM => {
                    hint.push_str(" (permission denied; check ownership and write permissions)");
                }
                libc::EXDEV => {
                    hint.push_str(" (cross-filesystem; batch folders must live on the same volume)");
                }
                libc::EBUSY => {
                    hint.push_str(" (resource busy; ensure no other process is using the file)");
                }
                libc::ENOENT => {
                    hint.push_str(" (path not found; the folder changed while running)");
                }
                libc::EEXIST => {
                    hint.push_str(" (already exists)");
                }
                libc::ENOSPC => {
                    hint.push_str(" (insufficient space on device)");
                }
                libc::EROFS => {
                    hint.push_str(" (read-only filesystem; cannot write here)");
                }
                libc::ENAMETOOLONG => {
                    hint.push_str(" (filename or path too long; use a shorter folder prefix)");
                }
                _ => {}
            }
        }
        #[cfg(windows)]
        {
            // Common Win32 errors
            match code {
                5 => hint.push_str(" (access denied; check permissions)"), // ERROR_ACCESS_DENIED
                17 => hint.push_str(" (not same device; cross-filesystem move)"), // ERROR_NOT_SAME_DEVICE
                32 => hint.push_str(" (sharing violation; file is in use)"), // ERROR_SHARING_VIOLATION
                2 | 3 => hint.push_str(" (path not found)"),               // FILE/ PATH NOT FOUND
                80 | 183 => hint.push_str(" (already exists)"),            // ERROR_FILE_EXISTS / ALREADY_EXISTS
                112 => hint.push_str(" (insufficient disk space)"),        // ERROR_DISK_FULL
                206 => hint.push_str(" (filename or path too long)"),      // ERROR_FILENAME_EXCED_RANGE
                _ => {}
            }
        }
        hint.push_str(&format!(" [os code: {}]", code));
    } else {
        match e.kind() {
            io::ErrorKind::PermissionDenied => {
                hint.push_str(" (permission denied; check ownership and write permissions)");
            }
            io::ErrorKind::NotFound => {
                hint.push_str(" (path not found)");
            }
            io::ErrorKind::AlreadyExists => {
                hint.push_str(" (already exists)");
            }
            _ => {}
        }
    }

    hint
}

/// Wrap an io::Error into the typed `Io` variant with operation, path and hint.
pub fn io_error(op: &str, path: &Path, e: io::Error) -> BatchMoverError {
    BatchMoverError::Io {
        op: op.to_string(),
        path: path.to_path_buf(),
        hint: hint_for(&e),
        source: e,
    }
}

/// Adapter for anyhow::Result code.
/// Returns a closure suitable for `.map_err(...)` that converts io::Error -> anyhow::Error.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| io_error(op, path, e).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn wraps_as_typed_io_error() {
        let path = PathBuf::from("/nowhere/file.txt");
        let e = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err = io_error_with_help("rename file", &path)(e);
        let typed = err.downcast_ref::<BatchMoverError>().expect("typed error");
        assert!(matches!(typed, BatchMoverError::Io { .. }));
        let msg = err.to_string();
        assert!(msg.contains("rename file"), "got: {msg}");
        assert!(msg.contains("path not found"), "got: {msg}");
    }

    #[cfg(unix)]
    #[test]
    fn cross_device_hint_on_unix() {
        let path = PathBuf::from("/mnt/other");
        let e = io::Error::from_raw_os_error(libc::EXDEV);
        let msg = io_error("rename file", &path, e).to_string();
        assert!(msg.contains("cross-filesystem"), "got: {msg}");
        assert!(msg.contains("os code"), "got: {msg}");
    }
}
