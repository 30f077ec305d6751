//! Shared data structures for storage operations.

use std::fmt;
use std::path::PathBuf;

use crate::error::{StorageError, TransferError};

/// Configuration settings for the storage client.
#[derive(Debug, Clone)]
pub struct StorageSettings {
    /// AWS region.
    pub region: String,
    /// Static credentials; `None` uses the default credential chain.
    pub credentials: Option<AwsCredentials>,
    /// Custom endpoint for S3-compatible services.
    pub endpoint_url: Option<String>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            region: "us-east-1".into(),
            credentials: None,
            endpoint_url: None,
        }
    }
}

/// AWS credentials.
#[derive(Clone)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Copy every object under `prefix` from one bucket to another.
#[derive(Debug, Clone)]
pub struct CopyRequest {
    pub source_bucket: String,
    pub target_bucket: String,
    /// Folder-like prefix; a trailing `/` is added if missing.
    pub prefix: String,
}

/// Upload changed files from a local directory to a bucket.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Local directory to walk.
    pub local_root: PathBuf,
    pub bucket: String,
    /// Prepended to every relative path to form the object key. Usually empty.
    pub key_prefix: String,
    /// Clear the recorded fingerprints for this bucket/prefix before comparing.
    pub invalidate: bool,
    /// Follow symlinks while walking `local_root`.
    pub follow_symlinks: bool,
}

/// Download every object under `prefix` into a local directory.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub bucket: String,
    /// Folder-like prefix; a trailing `/` is added if missing.
    pub prefix: String,
    /// Directory that mirrors the prefix.
    pub local_root: PathBuf,
}

/// Aggregated statistics for batch operations.
#[derive(Debug, Clone, Default)]
pub struct TransferStatistics {
    /// Total objects/files processed.
    pub files_processed: u64,
    /// Objects actually transferred (not skipped).
    pub files_transferred: u64,
    /// Objects skipped (already present or unchanged).
    pub files_skipped: u64,
    /// Total bytes transferred.
    pub bytes_transferred: u64,
    /// Total bytes skipped.
    pub bytes_skipped: u64,
    /// Errors encountered (non-fatal).
    pub errors: Vec<TransferError>,
}

impl TransferStatistics {
    /// Create statistics for a skipped object.
    pub fn skipped(size: u64) -> Self {
        Self {
            files_processed: 1,
            files_skipped: 1,
            bytes_skipped: size,
            ..Default::default()
        }
    }

    /// Create statistics for a transferred object.
    pub fn transferred(size: u64) -> Self {
        Self {
            files_processed: 1,
            files_transferred: 1,
            bytes_transferred: size,
            ..Default::default()
        }
    }

    /// Create statistics for an object that failed.
    pub fn failed(key: impl Into<String>, error: StorageError) -> Self {
        Self {
            files_processed: 1,
            errors: vec![TransferError::new(key, error)],
            ..Default::default()
        }
    }

    /// Number of objects that failed.
    pub fn files_failed(&self) -> u64 {
        self.errors.len() as u64
    }

    /// Merge another statistics into this one.
    pub fn merge(&mut self, other: Self) {
        self.files_processed += other.files_processed;
        self.files_transferred += other.files_transferred;
        self.files_skipped += other.files_skipped;
        self.bytes_transferred += other.bytes_transferred;
        self.bytes_skipped += other.bytes_skipped;
        self.errors.extend(other.errors);
    }
}

impl fmt::Display for TransferStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} processed, {} transferred ({} bytes), {} skipped, {} failed",
            self.files_processed,
            self.files_transferred,
            self.bytes_transferred,
            self.files_skipped,
            self.files_failed()
        )
    }
}
