//! Filesystem operations: listing, folder creation, relocation.

mod discover;
pub mod helpers;
mod relocate;

pub use discover::list_files;
pub use relocate::{create_batch_folder, entry_exists, fsync_dir, relocate_file};
