//! File system error types.

use bucket_sync_common::PathError;
use thiserror::Error;

/// Errors that can occur while enumerating local files.
#[derive(Debug, Error)]
pub enum FileSystemError {
    /// Root directory does not exist or is not a directory.
    #[error("Not a directory: {path}")]
    NotADirectory { path: String },

    /// I/O error while walking the tree.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Path could not be expressed relative to the root.
    #[error(transparent)]
    Path(#[from] PathError),
}
