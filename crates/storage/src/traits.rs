//! Storage traits/interfaces for S3 operations.

use std::path::Path;

use async_trait::async_trait;

use crate::error::StorageError;

/// Information about an S3 object from list operations.
#[derive(Debug, Clone)]
pub struct ObjectInfo {
    /// S3 object key.
    pub key: String,
    /// Object size in bytes.
    pub size: u64,
}

impl ObjectInfo {
    /// Object info carrying only a key and size.
    pub fn new(key: impl Into<String>, size: u64) -> Self {
        Self {
            key: key.into(),
            size,
        }
    }

    /// Keys ending in `/` are folder placeholders, not content.
    pub fn is_directory_placeholder(&self) -> bool {
        self.key.ends_with('/')
    }
}

/// Low-level S3 operations - implemented by each backend.
///
/// A missing object is a first-class outcome (`Ok(None)` from `head_object`),
/// never an error to be inspected.
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// List all objects under a prefix.
    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> Result<Vec<ObjectInfo>, StorageError>;

    /// Check if an object exists and return its size.
    /// Returns None if object doesn't exist.
    async fn head_object(&self, bucket: &str, key: &str) -> Result<Option<u64>, StorageError>;

    /// Server-side copy of one object into another bucket/key.
    async fn copy_object(
        &self,
        source_bucket: &str,
        source_key: &str,
        target_bucket: &str,
        target_key: &str,
    ) -> Result<(), StorageError>;

    /// Stream an object into a new local file, returning bytes written.
    async fn get_object_to_file(
        &self,
        bucket: &str,
        key: &str,
        file_path: &Path,
    ) -> Result<u64, StorageError>;

    /// Upload bytes to S3.
    async fn put_object(&self, bucket: &str, key: &str, data: &[u8]) -> Result<(), StorageError>;
}
