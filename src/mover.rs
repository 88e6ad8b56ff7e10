//! The batch mover.
//!
//! Discovers the files of a work folder once, then on `move_files` sorts them
//! (if asked), cuts the list into batches of `batch_size` and renames each
//! batch into a freshly created folder named `{prefix}{start_index + i}`.
//!
//! Failure model: any error aborts the run immediately. Batches completed
//! before the failing one stay moved and nothing is rolled back, so an aborted
//! run can leave the work folder in a mixed state. `Config::preflight` checks
//! every destination name before the first folder is created, which turns the
//! common "folder already exists" failure into an all-or-nothing one.
//!
//! The work folder is assumed to be used by this process alone for the whole
//! run; concurrent changes to it are not detected.

use anyhow::Result;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::{Config, resolve_work_folder};
use crate::errors::BatchMoverError;
use crate::fs_ops::{create_batch_folder, entry_exists, fsync_dir, list_files, relocate_file};
use crate::sort::{SortKey, sort_files};

/// Number of batch folders needed for `n` files: ceil(n / batch_size).
pub fn folder_count(n: usize, batch_size: usize) -> usize {
    if batch_size == 0 {
        return 0;
    }
    n / batch_size + usize::from(n % batch_size != 0)
}

/// Name of the folder for 0-based batch `index`.
pub fn folder_name(prefix: &str, start_index: u64, index: usize) -> String {
    format!("{}{}", prefix, start_index + index as u64)
}

/// Snapshot of what a run would do, as reported before moving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoverInfo {
    pub current_directory: PathBuf,
    pub file_count: usize,
    pub folder_count: usize,
    pub first_folder: String,
    /// None when there is nothing to move
    pub last_folder: Option<String>,
}

impl fmt::Display for MoverInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "current directory: {}", self.current_directory.display())?;
        writeln!(f, "number of files: {}", self.file_count)?;
        writeln!(f, "number of folders to create: {}", self.folder_count)?;
        writeln!(f, "start folder: {}", self.first_folder)?;
        write!(f, "end folder: {}", self.last_folder.as_deref().unwrap_or("-"))
    }
}

/// One destination folder and the files it receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Batch {
    pub folder: String,
    pub files: Vec<String>,
}

/// Outcome of `move_files`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MoveReport {
    pub folders_created: Vec<String>,
    pub files_moved: usize,
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct BatchMover {
    work_folder: PathBuf,
    files: Vec<String>,
    batch_size: usize,
    folder_prefix: String,
    start_index: u64,
    sort_key: SortKey,
    reverse: bool,
    dry_run: bool,
    preflight: bool,
    sorted: bool,
}

/// File name of the running executable, if it can be determined.
fn own_file_name() -> Option<String> {
    let exe = std::env::current_exe().ok()?;
    exe.file_name()?.to_str().map(str::to_string)
}

impl BatchMover {
    /// Validate `config`, resolve the work folder and enumerate its files.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        let work_folder = resolve_work_folder(config.work_folder.as_deref())?;

        let mut excluded = config.exclude.clone();
        if let Some(me) = own_file_name() {
            excluded.push(me);
        }
        let files = list_files(&work_folder, &excluded)?;

        let count = folder_count(files.len(), config.batch_size);
        // The last folder is numbered start + count - 1.
        if config.start_index.checked_add(count.saturating_sub(1) as u64).is_none() {
            return Err(BatchMoverError::Configuration(format!(
                "start index {} overflows with {} folders",
                config.start_index, count
            ))
            .into());
        }

        info!(
            folder = %work_folder.display(),
            files = files.len(),
            folders = count,
            batch_size = config.batch_size,
            sort = %config.sort_key,
            reverse = config.reverse,
            "Batch mover ready"
        );

        Ok(Self {
            work_folder,
            files,
            batch_size: config.batch_size,
            folder_prefix: config.folder_prefix.clone(),
            start_index: config.start_index,
            sort_key: config.sort_key,
            reverse: config.reverse,
            dry_run: config.dry_run,
            preflight: config.preflight,
            sorted: false,
        })
    }

    pub fn work_folder(&self) -> &Path {
        &self.work_folder
    }

    /// File names in their current order (listing order until sorted).
    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn folder_count(&self) -> usize {
        folder_count(self.files.len(), self.batch_size)
    }

    fn folder_name(&self, index: usize) -> String {
        folder_name(&self.folder_prefix, self.start_index, index)
    }

    /// Describe the run. File count reflects discovery, not the folder's current state.
    pub fn info(&self) -> MoverInfo {
        let count = self.folder_count();
        MoverInfo {
            current_directory: self.work_folder.clone(),
            file_count: self.files.len(),
            folder_count: count,
            first_folder: self.folder_name(0),
            last_folder: count.checked_sub(1).map(|last| self.folder_name(last)),
        }
    }

    /// Apply the sort key once per instance.
    fn ensure_sorted(&mut self) -> Result<()> {
        if !self.sorted {
            sort_files(&self.work_folder, &mut self.files, self.sort_key, self.reverse)?;
            self.sorted = true;
        }
        Ok(())
    }

    /// The batches a move would perform, in order, after sorting.
    pub fn plan(&mut self) -> Result<Vec<Batch>> {
        self.ensure_sorted()?;
        Ok(self
            .files
            .chunks(self.batch_size)
            .enumerate()
            .map(|(i, chunk)| Batch {
                folder: self.folder_name(i),
                files: chunk.to_vec(),
            })
            .collect())
    }

    /// Fail with Conflict if any destination folder name is already taken.
    fn check_destinations(&self) -> Result<()> {
        for i in 0..self.folder_count() {
            let dest = self.work_folder.join(self.folder_name(i));
            if entry_exists(&dest) {
                warn!(dest = %dest.display(), "Preflight found an existing entry");
                return Err(BatchMoverError::Conflict(dest).into());
            }
        }
        debug!(folders = self.folder_count(), "Preflight passed");
        Ok(())
    }

    /// Sort, create the batch folders in ascending order and move every file.
    ///
    /// Errors abort immediately; batches finished before the error stay moved.
    pub fn move_files(&mut self) -> Result<MoveReport> {
        if self.files.is_empty() {
            return Err(BatchMoverError::EmptyInput(self.work_folder.clone()).into());
        }

        info!("Moving files to folders...");
        let batches = self.plan()?;

        if self.preflight {
            self.check_destinations()?;
        }

        let mut report = MoveReport {
            dry_run: self.dry_run,
            ..MoveReport::default()
        };

        for batch in &batches {
            let dest = self.work_folder.join(&batch.folder);

            if self.dry_run {
                if entry_exists(&dest) {
                    return Err(BatchMoverError::Conflict(dest).into());
                }
                info!(folder = %batch.folder, files = batch.files.len(), "dry-run: would create folder");
                for name in &batch.files {
                    debug!(file = %name, folder = %batch.folder, "dry-run: would move file");
                }
                report.folders_created.push(batch.folder.clone());
                report.files_moved += batch.files.len();
                continue;
            }

            info!(folder = %batch.folder, "Creating folder {}", batch.folder);
            create_batch_folder(&dest)?;
            report.folders_created.push(batch.folder.clone());

            for name in &batch.files {
                relocate_file(&self.work_folder, &dest, name)?;
                report.files_moved += 1;
            }

            // Ignore fsync errors to avoid turning a completed batch into a failure.
            let _ = fsync_dir(&dest);
        }

        info!(
            folders = report.folders_created.len(),
            files = report.files_moved,
            dry_run = report.dry_run,
            "Move complete"
        );
        Ok(report)
    }
}
