//! Directory-to-bucket upload orchestration.
//!
//! Every regular file under the local root is fingerprinted (SHA-256) on every
//! run. A file is uploaded when its fingerprint differs from the one recorded
//! at `{bucket}/{object_key}`; the new fingerprint is persisted after each
//! successful upload.
//!
//! # Example
//!
//! ```ignore
//! use bucket_sync_storage::{TransferState, UploadOrchestrator, UploadRequest};
//!
//! let state = TransferState::open("localCache.json").await;
//! let mut orchestrator = UploadOrchestrator::new(&client, state);
//! let stats = orchestrator.upload_directory(&request).await?;
//! ```

use std::path::Path;

use bucket_sync_common::{hash_file, join_key, KEY_SEPARATOR};
use bucket_sync_filesystem::{FileSystemScanner, LocalFile};

use crate::error::StorageError;
use crate::traits::StorageClient;
use crate::transfer_state::{Marker, TransferKey, TransferState};
use crate::types::{TransferStatistics, UploadRequest};

/// High-level upload operations using any StorageClient implementation.
pub struct UploadOrchestrator<'a, C: StorageClient> {
    /// The storage client for S3 operations.
    client: &'a C,
    /// Fingerprints of previously uploaded files.
    state: TransferState,
}

impl<'a, C: StorageClient> UploadOrchestrator<'a, C> {
    /// Create a new upload orchestrator.
    ///
    /// # Arguments
    /// * `client` - Storage client for S3 operations
    /// * `state` - Loaded transfer state
    pub fn new(client: &'a C, state: TransferState) -> Self {
        Self { client, state }
    }

    /// The transfer state as updated so far.
    pub fn state(&self) -> &TransferState {
        &self.state
    }

    /// Give back the transfer state.
    pub fn into_state(self) -> TransferState {
        self.state
    }

    /// Upload every new or changed file under `request.local_root`.
    ///
    /// When `request.invalidate` is set, the recorded fingerprints for the
    /// bucket/prefix are cleared once before any comparison, so every file
    /// is uploaded.
    ///
    /// # Errors
    /// Returns error only if the local directory cannot be walked.
    pub async fn upload_directory(
        &mut self,
        request: &UploadRequest,
    ) -> Result<TransferStatistics, StorageError> {
        let files: Vec<LocalFile> = FileSystemScanner::new()
            .with_follow_symlinks(request.follow_symlinks)
            .list_files(&request.local_root)?;

        log::info!(
            "Found {} files under {}",
            files.len(),
            request.local_root.display()
        );

        // One normalized prefix for object keys and the invalidation scope.
        let key_prefix: &str = request.key_prefix.trim_matches(KEY_SEPARATOR);

        if request.invalidate {
            let scope: TransferKey = TransferKey::upload_scope(&request.bucket, key_prefix);
            log::info!("Invalidating recorded uploads under {}", scope);
            self.state.invalidate(scope);
            self.state.persist().await;
        }

        let mut stats = TransferStatistics::default();
        for file in &files {
            stats.merge(self.upload_file(&request.bucket, key_prefix, file).await);
        }

        Ok(stats)
    }

    /// Upload one file if its fingerprint changed.
    async fn upload_file(
        &mut self,
        bucket: &str,
        key_prefix: &str,
        file: &LocalFile,
    ) -> TransferStatistics {
        let fingerprint: String = match hash_file(&file.path) {
            Ok(hash) => hash,
            Err(e) => {
                log::error!("Failed to hash {}: {}", file.path.display(), e);
                return TransferStatistics::failed(
                    &file.relative_path,
                    StorageError::io(file.path.display().to_string(), &e),
                );
            }
        };

        let object_key: String = join_key(key_prefix, &file.relative_path);
        let key: TransferKey = TransferKey::for_upload(bucket, &object_key);

        if self
            .state
            .get(&key)
            .is_some_and(|marker: &Marker| marker.matches(&fingerprint))
        {
            log::info!("Skipping {}, already uploaded.", file.path.display());
            return TransferStatistics::skipped(file.size);
        }

        match self.put_file(bucket, &object_key, &file.path).await {
            Ok(bytes) => {
                log::info!("Uploaded {} to {}.", file.path.display(), object_key);
                self.state.record(key, Marker::Fingerprint(fingerprint)).await;
                TransferStatistics::transferred(bytes)
            }
            Err(e) => {
                log::error!("Failed to upload {}: {}", file.path.display(), e);
                TransferStatistics::failed(&file.relative_path, e)
            }
        }
    }

    /// Read the whole file and put it at `bucket/key`.
    async fn put_file(&self, bucket: &str, key: &str, path: &Path) -> Result<u64, StorageError> {
        let data: Vec<u8> = tokio::fs::read(path)
            .await
            .map_err(|e| StorageError::io(path.display().to_string(), &e))?;
        self.client.put_object(bucket, key, &data).await?;
        Ok(data.len() as u64)
    }
}
