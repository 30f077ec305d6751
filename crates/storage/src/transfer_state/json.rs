//! JSON file backend for transfer state.
//!
//! The file holds a pretty-printed JSON object nested by key segment:
//!
//! ```json
//! {
//!   "devTprod": { "images": { "x.png": true } },
//!   "site": { "a.txt": "2cf24dba..." }
//! }
//! ```
//!
//! There is no schema version; format changes require deleting the file.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use bucket_sync_common::{is_fingerprint, KEY_SEPARATOR};
use serde_json::{Map, Value};

use super::backend::TransferStateBackend;
use super::entry::{Marker, TransferKey};
use super::error::TransferStateError;

/// Default state file name, relative to the working directory.
pub const DEFAULT_STATE_FILE: &str = "localCache.json";

/// Transfer state stored in a single local JSON file.
///
/// Every save rewrites the whole file.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    /// Create a backend for the file at `path`. The file need not exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn path_string(&self) -> String {
        self.path.display().to_string()
    }
}

#[async_trait]
impl TransferStateBackend for JsonFileBackend {
    async fn load(&self) -> Result<Option<BTreeMap<TransferKey, Marker>>, TransferStateError> {
        if !tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(None);
        }

        let data: String =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|source| TransferStateError::Io {
                    path: self.path_string(),
                    source,
                })?;

        let root: Value =
            serde_json::from_str(&data).map_err(|source| TransferStateError::Parse {
                path: self.path_string(),
                source,
            })?;

        let entries: BTreeMap<TransferKey, Marker> =
            flatten(&root).ok_or_else(|| TransferStateError::InvalidState {
                path: self.path_string(),
                message: "root is not a JSON object".to_string(),
            })?;

        Ok(Some(entries))
    }

    async fn save(
        &self,
        entries: &BTreeMap<TransferKey, Marker>,
    ) -> Result<(), TransferStateError> {
        let text: String = serde_json::to_string_pretty(&nest(entries))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|source| TransferStateError::Io {
                        path: parent.display().to_string(),
                        source,
                    })?;
            }
        }

        tokio::fs::write(&self.path, text)
            .await
            .map_err(|source| TransferStateError::Io {
                path: self.path_string(),
                source,
            })
    }

    fn location(&self) -> String {
        self.path_string()
    }
}

/// Flatten a nested JSON tree into `key -> marker`.
///
/// Returns `None` if the root is not an object. Leaves that carry no marker
/// are dropped.
pub fn flatten(root: &Value) -> Option<BTreeMap<TransferKey, Marker>> {
    let object: &Map<String, Value> = root.as_object()?;
    let mut entries: BTreeMap<TransferKey, Marker> = BTreeMap::new();
    flatten_into(object, None, &mut entries);
    Some(entries)
}

fn flatten_into(
    object: &Map<String, Value>,
    parent: Option<&str>,
    entries: &mut BTreeMap<TransferKey, Marker>,
) {
    for (segment, value) in object {
        let key: String = match parent {
            Some(p) => format!("{}{}{}", p, KEY_SEPARATOR, segment),
            None => segment.clone(),
        };

        match value {
            Value::Object(child) => flatten_into(child, Some(&key), entries),
            leaf => match Marker::from_json(leaf) {
                Some(marker) => {
                    if let Marker::Fingerprint(ref hash) = marker {
                        if !is_fingerprint(hash) {
                            log::debug!("State entry {} holds a non-SHA-256 value", key);
                        }
                    }
                    entries.insert(TransferKey::from_raw(key), marker);
                }
                None => log::debug!("Ignoring state entry {} with value {}", key, leaf),
            },
        }
    }
}

/// Nest a flat `key -> marker` map into a JSON tree split on `/`.
///
/// A leaf found where an intermediate object is needed is replaced by an
/// object, so the input should be prefix-free.
pub fn nest(entries: &BTreeMap<TransferKey, Marker>) -> Value {
    let mut root: Map<String, Value> = Map::new();

    'entries: for (key, marker) in entries {
        let segments: Vec<&str> = key.segments().collect();
        let (leaf, parents) = match segments.split_last() {
            Some(split) => split,
            None => continue,
        };

        let mut current: &mut Map<String, Value> = &mut root;
        for segment in parents {
            let slot: &mut Value = current
                .entry((*segment).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Value::Object(map) = slot else {
                continue 'entries;
            };
            current = map;
        }

        current.insert((*leaf).to_string(), marker.to_json());
    }

    Value::Object(root)
}
