//! Storage abstraction and sync orchestration for bucket-sync.
//!
//! This crate provides a backend-agnostic interface to an S3-style object
//! store and three one-directional operations built on it:
//!
//! - **Copy** - Copy objects missing from a target bucket ([`CopyOrchestrator`])
//! - **Upload** - Upload changed local files to a bucket ([`UploadOrchestrator`])
//! - **Download** - Mirror a bucket prefix to disk ([`DownloadOrchestrator`])
//!
//! # Transfer State
//!
//! Copy and upload consult a [`TransferState`], a local record of what was
//! already transferred, to skip redundant network operations on repeated runs.
//! It is written back after every successful transfer.
//!
//! The storage client is always passed in explicitly; see the
//! `bucket-sync-storage-s3` crate for the AWS implementation.

mod copy;
mod download;
mod error;
pub mod transfer_state;
mod traits;
mod types;
mod upload;

pub use copy::CopyOrchestrator;
pub use download::DownloadOrchestrator;
pub use error::{StorageError, TransferError};
pub use traits::{ObjectInfo, StorageClient};
pub use transfer_state::{
    JsonFileBackend, Marker, TransferKey, TransferState, TransferStateBackend,
    TransferStateError, DEFAULT_STATE_FILE,
};
pub use types::{
    AwsCredentials, CopyRequest, DownloadRequest, StorageSettings, TransferStatistics,
    UploadRequest,
};
pub use upload::UploadOrchestrator;
