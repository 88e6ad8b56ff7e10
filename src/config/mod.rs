//! Config module.
//! Provides configuration types, work folder resolution, log path helpers and validation.

pub mod paths;
pub mod types;
mod validate;

pub use paths::{open_log_file_append, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use validate::resolve_work_folder;

/// Defaults shared across submodules.
pub const BATCH_SIZE_DEFAULT: usize = 50;
pub const FOLDER_PREFIX_DEFAULT: &str = "folder-";
pub const START_INDEX_DEFAULT: u64 = 1;
