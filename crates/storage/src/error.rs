//! Error types for storage operations.

use bucket_sync_common::PathError;
use bucket_sync_filesystem::FileSystemError;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Error, Debug, Clone)]
pub enum StorageError {
    /// Object not found in S3.
    #[error("Object not found: s3://{bucket}/{key}")]
    NotFound { bucket: String, key: String },

    /// Access denied.
    #[error("Access denied to s3://{bucket}/{key}: {message}")]
    AccessDenied {
        bucket: String,
        key: String,
        message: String,
    },

    /// Network or service error.
    #[error("Network error: {message}")]
    NetworkError { message: String },

    /// Local I/O error.
    #[error("I/O error for {path}: {message}")]
    IoError { path: String, message: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Other error.
    #[error("{message}")]
    Other { message: String },
}

impl StorageError {
    /// Build an `IoError` for a local path.
    pub fn io(path: impl Into<String>, err: &std::io::Error) -> Self {
        StorageError::IoError {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

impl From<FileSystemError> for StorageError {
    fn from(err: FileSystemError) -> Self {
        match err {
            FileSystemError::NotADirectory { path } => StorageError::IoError {
                path,
                message: "not a directory".to_string(),
            },
            FileSystemError::IoError { path, source } => StorageError::IoError {
                path,
                message: source.to_string(),
            },
            FileSystemError::Path(e) => e.into(),
        }
    }
}

impl From<PathError> for StorageError {
    fn from(err: PathError) -> Self {
        StorageError::Other {
            message: err.to_string(),
        }
    }
}

/// Non-fatal error encountered during batch transfer.
#[derive(Debug, Clone)]
pub struct TransferError {
    /// The key/path that failed.
    pub key: String,
    /// The error that occurred.
    pub error: StorageError,
}

impl TransferError {
    /// Create a new transfer error.
    pub fn new(key: impl Into<String>, error: StorageError) -> Self {
        Self {
            key: key.into(),
            error,
        }
    }
}
