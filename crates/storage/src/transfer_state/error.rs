//! Transfer state error types.

use thiserror::Error;

/// Errors that can occur while loading or saving transfer state.
#[derive(Error, Debug)]
pub enum TransferStateError {
    /// I/O error on the state file.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// State file is not valid JSON.
    #[error("Malformed state file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// State file parsed but its root is not an object.
    #[error("Invalid state file {path}: {message}")]
    InvalidState { path: String, message: String },

    /// State could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
