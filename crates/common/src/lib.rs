//! Shared types and utilities for bucket-sync.
//!
//! This crate provides common functionality used across all bucket-sync crates:
//! - SHA-256 content fingerprints
//! - Object-key and path normalization utilities
//! - Shared error types

pub mod error;
pub mod hash;
pub mod path_utils;

// Re-export commonly used items at crate root
pub use error::PathError;
pub use hash::{hash_bytes, hash_file, is_fingerprint, Sha256Hasher, FINGERPRINT_HEX_LEN};
pub use path_utils::{
    from_posix_path, join_key, lexical_normalize, normalize_prefix, relative_posix_path,
    to_posix_path, KEY_SEPARATOR,
};
