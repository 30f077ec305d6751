//! AWS SDK S3 backend for bucket-sync.
//!
//! Provides a `StorageClient` implementation on top of the AWS SDK for Rust,
//! covering the listing, existence, copy, download and upload calls the sync
//! orchestrators need.
//!
//! # Example
//!
//! ```ignore
//! use bucket_sync_storage::{CopyOrchestrator, CopyRequest, StorageSettings, TransferState};
//! use bucket_sync_storage_s3::S3StorageClient;
//!
//! let client = S3StorageClient::new(StorageSettings::default()).await?;
//! let state = TransferState::open("localCache.json").await;
//! let mut copier = CopyOrchestrator::new(&client, state);
//! let stats = copier.copy_prefix(&CopyRequest {
//!     source_bucket: "dev".into(),
//!     target_bucket: "prod".into(),
//!     prefix: "images".into(),
//! }).await?;
//! ```

mod client;
mod error;

pub use client::S3StorageClient;
pub use error::S3Error;
