//! File system scanner for upload operations.

use std::path::{Path, PathBuf};

use bucket_sync_common::relative_posix_path;
use walkdir::WalkDir;

use crate::error::FileSystemError;

/// A regular file discovered under a scan root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    /// Path on disk.
    pub path: PathBuf,
    /// Path relative to the scan root, POSIX separators.
    pub relative_path: String,
    /// File size in bytes at scan time.
    pub size: u64,
}

/// Enumerates regular files beneath a directory.
///
/// Directories are traversed but never reported. Symlinks are skipped with a
/// warning unless `with_follow_symlinks(true)` is set.
#[derive(Debug, Clone, Default)]
pub struct FileSystemScanner {
    follow_symlinks: bool,
}

impl FileSystemScanner {
    /// Create a scanner that does not follow symlinks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow symlinked directories and files while walking.
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// List every regular file under `root`, sorted by relative path.
    ///
    /// # Arguments
    /// * `root` - Directory to walk
    ///
    /// # Errors
    /// Returns error if `root` is not a directory or any entry cannot be read.
    pub fn list_files(&self, root: &Path) -> Result<Vec<LocalFile>, FileSystemError> {
        if !root.is_dir() {
            return Err(FileSystemError::NotADirectory {
                path: root.display().to_string(),
            });
        }

        let mut files: Vec<LocalFile> = Vec::new();

        for entry in WalkDir::new(root).follow_links(self.follow_symlinks).into_iter() {
            let entry: walkdir::DirEntry = entry.map_err(|e| FileSystemError::IoError {
                path: e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
                source: e.into(),
            })?;

            if entry.depth() > 0 && entry.path_is_symlink() && !self.follow_symlinks {
                log::warn!("Skipping symlink {}", entry.path().display());
                continue;
            }

            if !entry.file_type().is_file() {
                continue;
            }

            let path: &Path = entry.path();
            let relative_path: String = relative_posix_path(path, root)?;
            let size: u64 = entry
                .metadata()
                .map_err(|e| FileSystemError::IoError {
                    path: path.display().to_string(),
                    source: e.into(),
                })?
                .len();

            files.push(LocalFile {
                path: path.to_path_buf(),
                relative_path,
                size,
            });
        }

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Ok(files)
    }
}
