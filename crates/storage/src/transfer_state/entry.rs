//! Transfer key and marker types.

use std::fmt;

use bucket_sync_common::{join_key, KEY_SEPARATOR};

/// Separator between source and target bucket in a copy transaction id.
pub const COPY_TRANSACTION_SEPARATOR: &str = "T";

/// Hierarchical key identifying one transferred object.
///
/// Built from a transaction identifier followed by the object path,
/// `/` separated:
/// - copy: `{source}T{target}/{object_key}`
/// - upload: `{bucket}/{object_key}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransferKey(String);

impl TransferKey {
    /// Key for an object copied from `source_bucket` to `target_bucket`.
    ///
    /// # Arguments
    /// * `source_bucket` - Bucket the object is read from
    /// * `target_bucket` - Bucket the object is written to
    /// * `object_key` - S3 object key (identical in both buckets)
    pub fn for_copy(source_bucket: &str, target_bucket: &str, object_key: &str) -> Self {
        Self(format!(
            "{}{}{}{}{}",
            source_bucket, COPY_TRANSACTION_SEPARATOR, target_bucket, KEY_SEPARATOR, object_key
        ))
    }

    /// Key for a local file uploaded to `bucket` at `object_key`.
    pub fn for_upload(bucket: &str, object_key: &str) -> Self {
        Self(format!("{}{}{}", bucket, KEY_SEPARATOR, object_key))
    }

    /// Subtree covering every upload into `bucket` under `key_prefix`.
    ///
    /// An empty prefix covers the whole bucket.
    pub fn upload_scope(bucket: &str, key_prefix: &str) -> Self {
        let prefix: &str = key_prefix.trim_matches(KEY_SEPARATOR);
        if prefix.is_empty() {
            Self(bucket.to_string())
        } else {
            Self(join_key(bucket, prefix))
        }
    }

    /// Wrap an already-built key string.
    pub fn from_raw(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the `/`-separated segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(KEY_SEPARATOR)
    }

    /// Keys of every strict ancestor, shortest first.
    pub fn ancestors(&self) -> impl Iterator<Item = TransferKey> + '_ {
        self.0
            .match_indices(KEY_SEPARATOR)
            .map(move |(idx, _)| TransferKey(self.0[..idx].to_string()))
    }

    /// String prefix shared by every descendant key.
    pub(crate) fn descendant_prefix(&self) -> String {
        format!("{}{}", self.0, KEY_SEPARATOR)
    }
}

impl fmt::Display for TransferKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Recorded outcome for a transfer key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    /// Object confirmed present at the destination.
    Confirmed,
    /// Content fingerprint (hex SHA-256) of the last uploaded version.
    Fingerprint(String),
    /// Cleared by explicit invalidation.
    Invalidated,
}

impl Marker {
    /// Whether this marker records exactly `fingerprint`.
    ///
    /// `Invalidated` and `Confirmed` never match a fingerprint.
    pub fn matches(&self, fingerprint: &str) -> bool {
        match self {
            Marker::Fingerprint(recorded) => !recorded.is_empty() && recorded == fingerprint,
            Marker::Confirmed | Marker::Invalidated => false,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, Marker::Confirmed)
    }

    /// JSON leaf for this marker: `true`, the fingerprint, or `""`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Marker::Confirmed => serde_json::Value::Bool(true),
            Marker::Fingerprint(hash) => serde_json::Value::String(hash.clone()),
            Marker::Invalidated => serde_json::Value::String(String::new()),
        }
    }

    /// Parse a JSON leaf. Returns `None` for leaves that carry no marker
    /// (`false`, numbers, null, arrays).
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Bool(true) => Some(Marker::Confirmed),
            serde_json::Value::String(s) if s.is_empty() => Some(Marker::Invalidated),
            serde_json::Value::String(s) => Some(Marker::Fingerprint(s.clone())),
            _ => None,
        }
    }
}
