//! Core library for `batch_mover`.
//!
//! Splits the files sitting directly in one folder into numbered batch folders
//! (`folder-1`, `folder-2`, ...), optionally sorting them first.
//! The library holds everything; the binary only parses flags and sets up logging.

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod mover;
pub mod output;
pub mod sort;

pub use config::{Config, LogLevel, open_log_file_append, path_has_symlink_ancestor};
pub use errors::BatchMoverError;
pub use mover::{Batch, BatchMover, MoveReport, MoverInfo, folder_count, folder_name};
pub use sort::{SortKey, sort_files};
