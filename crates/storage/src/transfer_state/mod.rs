//! Transfer state tracking for avoiding redundant transfers.
//!
//! The transfer state records, per transfer key, what the last successful
//! run did with an object:
//! - copy: `{source}T{target}/{key} → Confirmed`
//! - upload: `{bucket}/{key} → Fingerprint(sha256)`
//!
//! State is loaded once, mutated after every successful transfer and written
//! back immediately. Load and save failures degrade to an in-memory state;
//! they never stop a run. A crash after a failed save can repeat a transfer
//! on the next run (at-least-once).
//!
//! Keys are kept prefix-free: no stored key is a `/`-ancestor of another.
//! Setting a key replaces any stored ancestor or descendant, and
//! invalidating a key clears its whole subtree.

mod backend;
mod entry;
mod error;
mod json;

pub use backend::TransferStateBackend;
pub use entry::{Marker, TransferKey, COPY_TRANSACTION_SEPARATOR};
pub use error::TransferStateError;
pub use json::{flatten, nest, JsonFileBackend, DEFAULT_STATE_FILE};

use std::collections::BTreeMap;
use std::path::PathBuf;

/// In-memory transfer state with a durable backend.
pub struct TransferState {
    /// Flat, prefix-free map of recorded outcomes.
    entries: BTreeMap<TransferKey, Marker>,
    /// The storage backend.
    backend: Box<dyn TransferStateBackend>,
}

impl TransferState {
    /// Load state from `backend`.
    ///
    /// A missing or unreadable state yields an empty state.
    ///
    /// # Arguments
    /// * `backend` - Storage backend implementation
    pub async fn load(backend: impl TransferStateBackend + 'static) -> Self {
        let entries: BTreeMap<TransferKey, Marker> = match backend.load().await {
            Ok(Some(entries)) => {
                log::debug!(
                    "Loaded {} transfer state entries from {}",
                    entries.len(),
                    backend.location()
                );
                entries
            }
            Ok(None) => BTreeMap::new(),
            Err(e) => {
                log::error!("Error reading transfer state: {}", e);
                BTreeMap::new()
            }
        };

        Self {
            entries,
            backend: Box::new(backend),
        }
    }

    /// Load state from a JSON file.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        Self::load(JsonFileBackend::new(path)).await
    }

    /// Look up the marker recorded for `key`.
    ///
    /// # Returns
    /// `None` if nothing is recorded at exactly this key, including when the
    /// key lies beneath an invalidated subtree.
    pub fn get(&self, key: &TransferKey) -> Option<&Marker> {
        self.entries.get(key)
    }

    /// Record `marker` at `key` in memory. Call `persist` to make it durable.
    pub fn set(&mut self, key: TransferKey, marker: Marker) {
        for ancestor in key.ancestors() {
            self.entries.remove(&ancestor);
        }
        self.remove_descendants(&key);
        self.entries.insert(key, marker);
    }

    /// Clear the subtree at `key`, leaving an `Invalidated` marker.
    ///
    /// Later lookups of `key` or anything beneath it never match a
    /// fingerprint.
    pub fn invalidate(&mut self, key: TransferKey) {
        self.set(key, Marker::Invalidated);
    }

    /// Write the full state to the backend.
    ///
    /// # Returns
    /// `false` if the write failed; the failure is logged and the in-memory
    /// state is kept.
    pub async fn persist(&self) -> bool {
        match self.backend.save(&self.entries).await {
            Ok(()) => true,
            Err(e) => {
                log::error!("Error writing transfer state: {}", e);
                false
            }
        }
    }

    /// `set` followed by `persist`.
    pub async fn record(&mut self, key: TransferKey, marker: Marker) -> bool {
        self.set(key, marker);
        self.persist().await
    }

    /// Number of recorded keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All recorded keys and markers, sorted by key.
    pub fn entries(&self) -> &BTreeMap<TransferKey, Marker> {
        &self.entries
    }

    /// Where the state is persisted.
    pub fn location(&self) -> String {
        self.backend.location()
    }

    fn remove_descendants(&mut self, key: &TransferKey) {
        let prefix: String = key.descendant_prefix();
        let doomed: Vec<TransferKey> = self
            .entries
            .range(TransferKey::from_raw(prefix.clone())..)
            .take_while(|(k, _)| k.as_str().starts_with(&prefix))
            .map(|(k, _)| k.clone())
            .collect();

        for k in doomed {
            self.entries.remove(&k);
        }
    }
}
