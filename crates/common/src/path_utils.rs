//! Path and object-key utilities.
//!
//! Object keys and transfer keys are always POSIX-style (`/` separated).

use std::path::{Component, Path, PathBuf};

use crate::error::PathError;

/// Separator used by object keys and transfer keys.
pub const KEY_SEPARATOR: char = '/';

/// Lexical path normalization without filesystem access.
///
/// Removes `.` components and resolves `..` components lexically.
/// Does not access the filesystem or resolve symlinks.
///
/// # Arguments
/// * `path` - Path to normalize
///
/// # Returns
/// Normalized path with `.` and `..` resolved lexically.
pub fn lexical_normalize(path: &Path) -> PathBuf {
    let mut components: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => { /* skip . */ }
            Component::ParentDir => {
                if !components.is_empty()
                    && !matches!(
                        components.last(),
                        Some(Component::ParentDir) | Some(Component::RootDir)
                    )
                {
                    components.pop();
                } else {
                    components.push(component);
                }
            }
            _ => components.push(component),
        }
    }

    components.iter().collect()
}

/// Convert a path to POSIX-style string (forward slashes).
///
/// # Arguments
/// * `path` - Path to convert
///
/// # Returns
/// String with forward slashes as separators.
pub fn to_posix_path(path: &Path) -> String {
    path.components()
        .map(|c: Component| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Path of `path` relative to `root`, in POSIX form.
///
/// # Errors
/// Returns `PathOutsideRoot` if `path` is not under `root`.
pub fn relative_posix_path(path: &Path, root: &Path) -> Result<String, PathError> {
    let normalized: PathBuf = lexical_normalize(path);
    let normalized_root: PathBuf = lexical_normalize(root);

    let relative: &Path =
        normalized
            .strip_prefix(&normalized_root)
            .map_err(|_| PathError::PathOutsideRoot {
                path: normalized.display().to_string(),
                root: normalized_root.display().to_string(),
            })?;

    Ok(to_posix_path(relative))
}

/// Ensure a listing prefix ends with the key separator.
///
/// An empty prefix stays empty so that it lists the whole bucket.
pub fn normalize_prefix(prefix: &str) -> String {
    if prefix.is_empty() || prefix.ends_with(KEY_SEPARATOR) {
        prefix.to_string()
    } else {
        format!("{}{}", prefix, KEY_SEPARATOR)
    }
}

/// Join a key prefix and a relative key with exactly one separator.
///
/// # Examples
/// `join_key("", "a.txt") == "a.txt"`, `join_key("site/", "a.txt") == "site/a.txt"`
pub fn join_key(prefix: &str, key: &str) -> String {
    let prefix: &str = prefix.trim_end_matches(KEY_SEPARATOR);
    let key: &str = key.trim_start_matches(KEY_SEPARATOR);
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}{}{}", prefix, KEY_SEPARATOR, key)
    }
}

/// Convert a POSIX-style object key to a host path under `destination_root`.
///
/// Empty segments and `.` are dropped.
///
/// # Errors
/// Returns `InvalidPath` if the key contains `..` segments or has no usable
/// segments, since the resulting file would not be inside `destination_root`.
pub fn from_posix_path(key: &str, destination_root: &Path) -> Result<PathBuf, PathError> {
    let mut result: PathBuf = destination_root.to_path_buf();
    let mut pushed: usize = 0;

    for segment in key.split(KEY_SEPARATOR) {
        match segment {
            "" | "." => continue,
            ".." => {
                return Err(PathError::InvalidPath {
                    path: key.to_string(),
                })
            }
            _ => {
                result.push(segment);
                pushed += 1;
            }
        }
    }

    if pushed == 0 {
        return Err(PathError::InvalidPath {
            path: key.to_string(),
        });
    }

    Ok(result)
}
