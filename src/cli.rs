//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - WORK_FOLDER defaults to the current directory.
//! - --debug is a shorthand for --log-level debug.
//! - The sort key is kept as a string here and parsed in to_config(), so a bad
//!   value is reported as a configuration error like every other bad setting.

use anyhow::Result;
use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};
use crate::config::{BATCH_SIZE_DEFAULT, FOLDER_PREFIX_DEFAULT, START_INDEX_DEFAULT};
use crate::sort::SortKey;

/// Split the files of a folder into numbered batch folders.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Distribute the files of a folder into numbered batch folders"
)]
pub struct Args {
    /// Folder whose files are distributed (default: current directory).
    #[arg(value_name = "WORK_FOLDER", value_hint = ValueHint::DirPath)]
    pub work_folder: Option<PathBuf>,

    /// Number of files per batch folder.
    #[arg(short = 'n', long = "num", value_name = "N", default_value_t = BATCH_SIZE_DEFAULT)]
    pub num: usize,

    /// Prefix of the batch folder names.
    #[arg(short = 'p', long, value_name = "PREFIX", default_value = FOLDER_PREFIX_DEFAULT)]
    pub prefix: String,

    /// Number of the first batch folder.
    #[arg(long, value_name = "N", default_value_t = START_INDEX_DEFAULT)]
    pub start: u64,

    /// Sort files before batching: none, created, modified, name, size, extension.
    #[arg(short = 's', long, value_name = "KEY")]
    pub sort: Option<String>,

    /// Reverse the sort order (no effect without --sort).
    #[arg(short = 'r', long)]
    pub reverse: bool,

    /// File name to leave in place (repeatable).
    #[arg(long, value_name = "NAME", action = clap::ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Print the info record only; nothing is moved.
    #[arg(long, help = "Print the info record and exit")]
    pub info: bool,

    /// Dry-run: log actions but do not modify the filesystem.
    #[arg(
        long,
        help = "Show what would be done, but do not create folders or move files"
    )]
    pub dry_run: bool,

    /// Check every destination folder name before creating the first one.
    #[arg(
        long,
        help = "Refuse to start if any batch folder name is already taken"
    )]
    pub preflight: bool,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Append logs to this file as well as stdout.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs and the info record in JSON.
    #[arg(long, help = "Emit logs and the info record in structured JSON")]
    pub json: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Build a Config from the parsed flags. Fails on an unknown sort key.
    pub fn to_config(&self) -> Result<Config> {
        let sort_key = match self.sort.as_deref() {
            Some(s) => s.parse::<SortKey>()?,
            None => SortKey::None,
        };
        Ok(Config {
            work_folder: self.work_folder.clone(),
            batch_size: self.num,
            folder_prefix: self.prefix.clone(),
            start_index: self.start,
            sort_key,
            reverse: self.reverse,
            exclude: self.exclude.clone(),
            dry_run: self.dry_run,
            preflight: self.preflight,
            log_level: self.effective_log_level().unwrap_or_default(),
            log_file: self.log_file.clone(),
        })
    }
}

pub fn parse() -> Args {
    Args::parse()
}
