//! Transfer state backend trait.

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::entry::{Marker, TransferKey};
use super::error::TransferStateError;

/// Pluggable durable storage for transfer state.
///
/// Backends report failures; `TransferState` decides how to degrade.
#[async_trait]
pub trait TransferStateBackend: Send + Sync {
    /// Read the full state.
    ///
    /// # Returns
    /// `Ok(None)` when nothing has been stored yet.
    async fn load(&self) -> Result<Option<BTreeMap<TransferKey, Marker>>, TransferStateError>;

    /// Overwrite the stored state with `entries`.
    ///
    /// # Arguments
    /// * `entries` - Complete flat state; keys are prefix-free
    async fn save(&self, entries: &BTreeMap<TransferKey, Marker>)
        -> Result<(), TransferStateError>;

    /// Human-readable location for log messages.
    fn location(&self) -> String;
}
