//! Bucket-to-directory download orchestration.
//!
//! Mirrors every object under a prefix into a local directory. No transfer
//! state is consulted: every run downloads everything present remotely.
//! An interrupted download leaves a truncated file behind.

use std::path::{Path, PathBuf};

use bucket_sync_common::{from_posix_path, normalize_prefix};

use crate::error::StorageError;
use crate::traits::{ObjectInfo, StorageClient};
use crate::types::{DownloadRequest, TransferStatistics};

/// High-level download operations using any StorageClient implementation.
pub struct DownloadOrchestrator<'a, C: StorageClient> {
    /// The storage client for S3 operations.
    client: &'a C,
}

impl<'a, C: StorageClient> DownloadOrchestrator<'a, C> {
    /// Create a new download orchestrator.
    ///
    /// # Arguments
    /// * `client` - Storage client for S3 operations
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Download every object under `request.prefix` into `request.local_root`.
    ///
    /// Keys ending in `/` are folder placeholders and are skipped.
    ///
    /// # Errors
    /// Returns error only if the listing fails.
    pub async fn download_prefix(
        &self,
        request: &DownloadRequest,
    ) -> Result<TransferStatistics, StorageError> {
        let prefix: String = normalize_prefix(&request.prefix);
        let objects: Vec<ObjectInfo> = self.client.list_objects(&request.bucket, &prefix).await?;

        if objects.is_empty() {
            log::info!("No objects found under s3://{}/{}", request.bucket, prefix);
            return Ok(TransferStatistics::default());
        }

        let mut stats = TransferStatistics::default();
        for object in &objects {
            if object.key.is_empty() || object.is_directory_placeholder() {
                continue;
            }
            stats.merge(self.download_object(request, &prefix, object).await);
        }

        Ok(stats)
    }

    async fn download_object(
        &self,
        request: &DownloadRequest,
        prefix: &str,
        object: &ObjectInfo,
    ) -> TransferStatistics {
        let relative: &str = object.key.strip_prefix(prefix).unwrap_or(&object.key);
        let local_path: PathBuf = match from_posix_path(relative, &request.local_root) {
            Ok(path) => path,
            Err(e) => {
                log::error!("Failed to download {}: {}", object.key, e);
                return TransferStatistics::failed(&object.key, e.into());
            }
        };

        match self.fetch(&request.bucket, &object.key, &local_path).await {
            Ok(bytes) => {
                log::info!("Downloaded {} to {}", object.key, local_path.display());
                TransferStatistics::transferred(bytes)
            }
            Err(e) => {
                log::error!("Failed to download {}: {}", object.key, e);
                TransferStatistics::failed(&object.key, e)
            }
        }
    }

    async fn fetch(&self, bucket: &str, key: &str, local_path: &Path) -> Result<u64, StorageError> {
        if let Some(parent) = local_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::io(parent.display().to_string(), &e))?;
        }
        self.client.get_object_to_file(bucket, key, local_path).await
    }
}

