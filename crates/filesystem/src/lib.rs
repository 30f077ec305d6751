//! File system operations for bucket-sync.
//!
//! - `FileSystemScanner` - Recursive enumeration of regular files under a root

pub mod error;
pub mod scanner;

pub use error::FileSystemError;
pub use scanner::{FileSystemScanner, LocalFile};
