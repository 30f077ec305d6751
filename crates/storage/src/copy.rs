//! Bucket-to-bucket copy orchestration.
//!
//! For every object under a source prefix:
//!
//! 1. Skip if the transfer state already holds `Confirmed` for
//!    `{source}T{target}/{key}` (no HEAD, no copy).
//! 2. HEAD the key in the target bucket. If present, record `Confirmed`.
//! 3. If missing, server-side copy it, then record `Confirmed`.
//!
//! Per-object failures are logged and the loop moves on; nothing is retried.
//! A listing failure aborts the whole operation.

use crate::error::StorageError;
use crate::traits::{ObjectInfo, StorageClient};
use crate::transfer_state::{Marker, TransferKey, TransferState};
use crate::types::{CopyRequest, TransferStatistics};

use bucket_sync_common::normalize_prefix;

/// Copies missing objects between buckets using any StorageClient implementation.
pub struct CopyOrchestrator<'a, C: StorageClient> {
    /// The storage client for S3 operations.
    client: &'a C,
    /// Record of objects already confirmed at the target.
    state: TransferState,
}

impl<'a, C: StorageClient> CopyOrchestrator<'a, C> {
    /// Create a new copy orchestrator.
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

    /// Copy every object under `request.prefix` that the target lacks.
    ///
    /// # Returns
    /// Statistics for the run. Per-object errors are collected, not returned.
    ///
    /// # Errors
    /// Returns error only if the source listing fails.
    pub async fn copy_prefix(
        &mut self,
        request: &CopyRequest,
    ) -> Result<TransferStatistics, StorageError> {
        let prefix: String = normalize_prefix(&request.prefix);
        let objects: Vec<ObjectInfo> = self
            .client
            .list_objects(&request.source_bucket, &prefix)
            .await?;

        log::info!(
            "Found {} objects under s3://{}/{}",
            objects.len(),
            request.source_bucket,
            prefix
        );

        let mut stats = TransferStatistics::default();
        for object in &objects {
            if object.key.is_empty() {
                continue;
            }
            stats.merge(self.copy_object(request, object).await);
        }

        Ok(stats)
    }

    /// Copy one object unless it is confirmed or already present.
    async fn copy_object(
        &mut self,
        request: &CopyRequest,
        object: &ObjectInfo,
    ) -> TransferStatistics {
        let key: TransferKey =
            TransferKey::for_copy(&request.source_bucket, &request.target_bucket, &object.key);

        if self.state.get(&key).is_some_and(Marker::is_confirmed) {
            log::info!("Object {} already copied and cached. Skipping.", object.key);
            return TransferStatistics::skipped(object.size);
        }

        let existing: Option<u64> = match self
            .client
            .head_object(&request.target_bucket, &object.key)
            .await
        {
            Ok(existing) => existing,
            Err(e) => {
                log::error!("Error checking object in target bucket: {}", e);
                return TransferStatistics::failed(&object.key, e);
            }
        };

        if existing.is_some() {
            log::info!(
                "Object {} already exists in {}. Skipping.",
                object.key,
                request.target_bucket
            );
            self.state.record(key, Marker::Confirmed).await;
            return TransferStatistics::skipped(object.size);
        }

        match self
            .client
            .copy_object(
                &request.source_bucket,
                &object.key,
                &request.target_bucket,
                &object.key,
            )
            .await
        {
            Ok(()) => {
                log::info!("Copied {} to {}.", object.key, request.target_bucket);
                self.state.record(key, Marker::Confirmed).await;
                TransferStatistics::transferred(object.size)
            }
            Err(e) => {
                log::error!("Failed to copy {}: {}", object.key, e);
                TransferStatistics::failed(&object.key, e)
            }
        }
    }
}
