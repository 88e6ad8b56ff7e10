//! Sort strategies applied to the file list before it is partitioned.
//!
//! Each `SortKey` maps a file name to a comparable key. Keys are computed once
//! per file (one metadata call each) and the list is reordered with a stable
//! sort, so files with equal keys keep their enumeration order. `reverse`
//! flips the comparison rather than the final list, which keeps ties stable
//! in descending order too.

use anyhow::Result;
use filetime::FileTime;
use std::cmp::Ordering;
use std::fmt;
use std::fs::{self, Metadata};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::errors::BatchMoverError;
use crate::fs_ops::helpers::io_error_with_help;

/// Ordering applied to the file list before batching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Keep directory listing order (filesystem dependent)
    #[default]
    None,
    /// Creation time (birth time, or inode change time where unavailable)
    Created,
    /// Last modification time
    Modified,
    /// File name, byte-wise lexicographic
    Name,
    /// Size in bytes
    Size,
    /// Extension, from the last dot on (".txt")
    Extension,
}

impl SortKey {
    /// Parse a sort key name (case-insensitive). Historical aliases are accepted.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "random" | "unsorted" => Some(SortKey::None),
            "created" | "creation" | "ctime" | "creating_date" => Some(SortKey::Created),
            "modified" | "modification" | "mtime" | "modification_date" => {
                Some(SortKey::Modified)
            }
            "name" => Some(SortKey::Name),
            "size" | "file_size" => Some(SortKey::Size),
            "extension" | "ext" | "type" | "file_type" => Some(SortKey::Extension),
            _ => None,
        }
    }

    /// Whether this key reads file metadata.
    fn needs_metadata(self) -> bool {
        matches!(self, SortKey::Created | SortKey::Modified | SortKey::Size)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortKey::None => "none",
            SortKey::Created => "created",
            SortKey::Modified => "modified",
            SortKey::Name => "name",
            SortKey::Size => "size",
            SortKey::Extension => "extension",
        };
        f.write_str(s)
    }
}

impl FromStr for SortKey {
    type Err = BatchMoverError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            BatchMoverError::Configuration(format!(
                "unknown sort key '{s}' (expected none, created, modified, name, size or extension)"
            ))
        })
    }
}

/// Comparable value extracted from one file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum KeyValue {
    Time(FileTime),
    Bytes(u64),
    Text(String),
}

/// Extension of a file name, dot included: everything from the last dot on.
/// Leading dots never start an extension, so ".bashrc" and "..name" have none,
/// while "trailing." has the extension ".".
pub fn extension_of(name: &str) -> &str {
    let stem_start = name.len() - name.trim_start_matches('.').len();
    match name[stem_start..].rfind('.') {
        Some(idx) => &name[stem_start + idx..],
        None => "",
    }
}

/// Creation time where the platform records it; otherwise the inode change time.
fn created_time(meta: &Metadata) -> FileTime {
    FileTime::from_creation_time(meta).unwrap_or_else(|| change_time(meta))
}

#[cfg(unix)]
fn change_time(meta: &Metadata) -> FileTime {
    use std::os::unix::fs::MetadataExt;
    FileTime::from_unix_time(meta.ctime(), meta.ctime_nsec() as u32)
}

#[cfg(not(unix))]
fn change_time(meta: &Metadata) -> FileTime {
    FileTime::from_last_modification_time(meta)
}

fn key_value(work_folder: &Path, name: &str, key: SortKey) -> Result<KeyValue> {
    if !key.needs_metadata() {
        let text = match key {
            SortKey::Extension => extension_of(name).to_string(),
            _ => name.to_string(),
        };
        return Ok(KeyValue::Text(text));
    }

    let path = work_folder.join(name);
    let meta = fs::metadata(&path).map_err(io_error_with_help("read metadata for", &path))?;
    Ok(match key {
        SortKey::Created => KeyValue::Time(created_time(&meta)),
        SortKey::Modified => KeyValue::Time(FileTime::from_last_modification_time(&meta)),
        _ => KeyValue::Bytes(meta.len()),
    })
}

/// Reorder `files` in place by `key`. `SortKey::None` leaves the list untouched,
/// whatever `reverse` says.
pub fn sort_files(work_folder: &Path, files: &mut Vec<String>, key: SortKey, reverse: bool) -> Result<()> {
    if key == SortKey::None {
        debug!("No sort key; keeping listing order");
        return Ok(());
    }

    // Collect every key first so a failed stat leaves `files` untouched.
    let mut keyed = files
        .iter()
        .map(|name| -> Result<(KeyValue, String)> {
            Ok((key_value(work_folder, name, key)?, name.clone()))
        })
        .collect::<Result<Vec<_>>>()?;

    keyed.sort_by(|(a, _), (b, _)| {
        let ord: Ordering = a.cmp(b);
        if reverse { ord.reverse() } else { ord }
    });

    files.clear();
    files.extend(keyed.into_iter().map(|(_, name)| name));
    debug!(key = %key, reverse, count = files.len(), "Sorted files");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};
    use tempfile::tempdir;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!(SortKey::parse("random"), Some(SortKey::None));
        assert_eq!(SortKey::parse("CTIME"), Some(SortKey::Created));
        assert_eq!(SortKey::parse("mtime"), Some(SortKey::Modified));
        assert_eq!(SortKey::parse("type"), Some(SortKey::Extension));
        assert_eq!(SortKey::parse(" Size "), Some(SortKey::Size));
        assert_eq!(SortKey::parse("colour"), None);
    }

    #[test]
    fn from_str_unknown_is_configuration_error() {
        let err = SortKey::from_str("colour").unwrap_err();
        assert!(matches!(err, BatchMoverError::Configuration(_)));
    }

    #[test]
    fn extension_rules() {
        assert_eq!(extension_of("a.txt"), ".txt");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of("README"), "");
        assert_eq!(extension_of(".bashrc"), "");
        assert_eq!(extension_of("..name"), "");
        assert_eq!(extension_of(".hidden.cfg"), ".cfg");
        assert_eq!(extension_of("trailing."), ".");
    }

    #[test]
    fn none_ignores_reverse() {
        let dir = tempdir().unwrap();
        let mut files = names(&["b", "a", "c"]);
        sort_files(dir.path(), &mut files, SortKey::None, true).unwrap();
        assert_eq!(files, names(&["b", "a", "c"]));
    }

    #[test]
    fn name_reverse_is_descending() {
        let dir = tempdir().unwrap();
        let mut files = names(&["b.txt", "a.txt", "c.txt"]);
        sort_files(dir.path(), &mut files, SortKey::Name, true).unwrap();
        assert_eq!(files, names(&["c.txt", "b.txt", "a.txt"]));
    }

    #[test]
    fn extension_sort_is_stable_and_groups_bare_names_first() {
        let dir = tempdir().unwrap();
        let mut files = names(&["z.txt", "b.jpg", "NOEXT", "a.txt", "c.jpg"]);
        sort_files(dir.path(), &mut files, SortKey::Extension, false).unwrap();
        assert_eq!(files, names(&["NOEXT", "b.jpg", "c.jpg", "z.txt", "a.txt"]));
    }

    #[test]
    fn reverse_keeps_ties_in_listing_order() {
        let dir = tempdir().unwrap();
        let mut files = names(&["z.txt", "b.jpg", "a.txt", "c.jpg"]);
        sort_files(dir.path(), &mut files, SortKey::Extension, true).unwrap();
        assert_eq!(files, names(&["z.txt", "a.txt", "b.jpg", "c.jpg"]));
    }

    #[test]
    fn size_and_modified_read_metadata() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("big"), vec![0u8; 30]).unwrap();
        fs::write(dir.path().join("small"), vec![0u8; 3]).unwrap();
        fs::write(dir.path().join("mid"), vec![0u8; 10]).unwrap();

        let mut files = names(&["big", "small", "mid"]);
        sort_files(dir.path(), &mut files, SortKey::Size, false).unwrap();
        assert_eq!(files, names(&["small", "mid", "big"]));

        let base = SystemTime::now() - Duration::from_secs(3600);
        for (i, n) in ["mid", "big", "small"].iter().enumerate() {
            let t = FileTime::from_system_time(base + Duration::from_secs(60 * i as u64));
            filetime::set_file_mtime(dir.path().join(n), t).unwrap();
        }
        sort_files(dir.path(), &mut files, SortKey::Modified, false).unwrap();
        assert_eq!(files, names(&["mid", "big", "small"]));
    }

    #[test]
    fn equal_sizes_keep_listing_order_when_reversed() {
        let dir = tempdir().unwrap();
        for n in ["q", "a", "m"] {
            fs::write(dir.path().join(n), b"same").unwrap();
        }
        fs::write(dir.path().join("large"), vec![0u8; 64]).unwrap();

        let mut files = names(&["q", "a", "large", "m"]);
        sort_files(dir.path(), &mut files, SortKey::Size, true).unwrap();
        assert_eq!(files, names(&["large", "q", "a", "m"]));
    }

    #[test]
    fn created_orders_by_creation() {
        let dir = tempdir().unwrap();
        for n in ["second", "first", "third"] {
            fs::write(dir.path().join(n), n).unwrap();
            std::thread::sleep(Duration::from_millis(50));
        }

        let mut files = names(&["third", "first", "second"]);
        sort_files(dir.path(), &mut files, SortKey::Created, false).unwrap();
        assert_eq!(files, names(&["second", "first", "third"]));

        sort_files(dir.path(), &mut files, SortKey::Created, true).unwrap();
        assert_eq!(files, names(&["third", "first", "second"]));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let mut files = names(&["ghost.bin"]);
        let err = sort_files(dir.path(), &mut files, SortKey::Size, false).unwrap_err();
        let typed = err.downcast_ref::<BatchMoverError>().unwrap();
        assert_eq!(typed.kind(), "io");
        assert_eq!(files, names(&["ghost.bin"]));
    }
}
