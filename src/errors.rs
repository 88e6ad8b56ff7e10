//! Typed error definitions for batch_mover.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchMoverError {
    #[error("No files to move in {0}")]
    EmptyInput(PathBuf),

    #[error("Destination already exists: {0}")]
    Conflict(PathBuf),

    #[error("Work folder not found or not a directory: {0}")]
    NotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("{op} '{}': {source}{hint}", path.display())]
    Io {
        op: String,
        path: PathBuf,
        hint: String,
        #[source]
        source: io::Error,
    },
}

impl BatchMoverError {
    /// Stable numeric code, usable as a process exit status.
    pub fn code(&self) -> i32 {
        match self {
            BatchMoverError::EmptyInput(_) => 3,
            BatchMoverError::Conflict(_) => 4,
            BatchMoverError::NotFound(_) => 5,
            BatchMoverError::Configuration(_) => 6,
            BatchMoverError::Io { .. } => 7,
        }
    }

    /// Short label used as the `kind` field in structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            BatchMoverError::EmptyInput(_) => "empty_input",
            BatchMoverError::Conflict(_) => "conflict",
            BatchMoverError::NotFound(_) => "not_found",
            BatchMoverError::Configuration(_) => "configuration",
            BatchMoverError::Io { .. } => "io",
        }
    }
}
