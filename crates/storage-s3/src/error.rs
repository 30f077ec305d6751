//! Error types for the S3 storage client.

use bucket_sync_storage::StorageError;
use thiserror::Error;

/// Errors specific to the S3 storage client.
#[derive(Error, Debug)]
pub enum S3Error {
    /// AWS SDK or service error.
    #[error("AWS SDK error: {message}")]
    SdkError { message: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<S3Error> for StorageError {
    fn from(err: S3Error) -> Self {
        match err {
            S3Error::SdkError { message } => StorageError::NetworkError { message },
            S3Error::ConfigError(message) => StorageError::InvalidConfig { message },
        }
    }
}
