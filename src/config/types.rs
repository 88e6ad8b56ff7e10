//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::{BATCH_SIZE_DEFAULT, FOLDER_PREFIX_DEFAULT, START_INDEX_DEFAULT};
use crate::sort::SortKey;

/// Program-defined verbosity levels exposed to users.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration used by the mover.
#[derive(Debug, Clone)]
pub struct Config {
    /// Folder whose direct-child files get batched; None means the current directory
    pub work_folder: Option<PathBuf>,
    /// Files per batch folder (the last one may hold fewer)
    pub batch_size: usize,
    /// Prefix of every batch folder name
    pub folder_prefix: String,
    /// Number appended to the prefix for the first batch
    pub start_index: u64,
    /// Ordering applied before partitioning
    pub sort_key: SortKey,
    /// Descending order (ignored with SortKey::None)
    pub reverse: bool,
    /// Extra file names to leave in place
    pub exclude: Vec<String>,
    /// If true, log the plan but do not modify the filesystem
    pub dry_run: bool,
    /// If true, check every destination name before creating the first folder
    pub preflight: bool,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_folder: None,
            batch_size: BATCH_SIZE_DEFAULT,
            folder_prefix: FOLDER_PREFIX_DEFAULT.to_string(),
            start_index: START_INDEX_DEFAULT,
            sort_key: SortKey::None,
            reverse: false,
            exclude: Vec::new(),
            dry_run: false,
            preflight: false,
            log_level: LogLevel::Normal,
            log_file: None,
        }
    }
}

impl Config {
    /// Construct a Config for a work folder and batch size; other fields use defaults.
    pub fn new(work_folder: impl Into<PathBuf>, batch_size: usize) -> Self {
        Self {
            work_folder: Some(work_folder.into()),
            batch_size,
            ..Default::default()
        }
    }
}
