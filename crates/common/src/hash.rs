//! Content fingerprinting.
//!
//! A fingerprint is the lowercase hex SHA-256 digest of a file's full
//! content. Fingerprints are always 64 characters and never empty.

use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

/// Length of a hex-encoded fingerprint.
pub const FINGERPRINT_HEX_LEN: usize = 64;

/// Compute the SHA-256 fingerprint of a byte slice.
///
/// # Arguments
/// * `data` - Bytes to hash
///
/// # Returns
/// 64-character lowercase hex string (256 bits).
pub fn hash_bytes(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Compute the SHA-256 fingerprint of a file.
///
/// Reads the file in chunks to avoid loading entire file into memory.
///
/// # Arguments
/// * `path` - Path to the file to hash
///
/// # Returns
/// 64-character lowercase hex string (256 bits).
///
/// # Errors
/// Returns error if file cannot be read.
pub fn hash_file(path: &Path) -> Result<String, std::io::Error> {
    let mut file: std::fs::File = std::fs::File::open(path)?;
    let mut hasher: Sha256Hasher = Sha256Hasher::new();
    let mut buffer: Vec<u8> = vec![0u8; 64 * 1024]; // 64KB buffer

    loop {
        let bytes_read: usize = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hasher.finish_hex())
}

/// Check whether a string has the shape of a fingerprint.
pub fn is_fingerprint(value: &str) -> bool {
    value.len() == FINGERPRINT_HEX_LEN
        && value
            .bytes()
            .all(|b: u8| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

/// Streaming hasher for incremental SHA-256 hashing.
pub struct Sha256Hasher {
    inner: Sha256,
}

impl Sha256Hasher {
    /// Create a new streaming hasher.
    pub fn new() -> Self {
        Self {
            inner: Sha256::new(),
        }
    }

    /// Update the hasher with additional data.
    ///
    /// # Arguments
    /// * `data` - Bytes to add to the hash computation
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Finalize and return the digest as a 64-char hex string.
    pub fn finish_hex(self) -> String {
        hex::encode(self.inner.finalize())
    }
}

impl Default for Sha256Hasher {
    fn default() -> Self {
        Self::new()
    }
}
