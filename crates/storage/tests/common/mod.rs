//! Shared test doubles for orchestrator integration tests.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use bucket_sync_storage::{ObjectInfo, StorageClient, StorageError};

/// One call made against the test client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List { bucket: String, prefix: String },
    Head { bucket: String, key: String },
    Copy {
        source_bucket: String,
        source_key: String,
        target_bucket: String,
        target_key: String,
    },
    Get { bucket: String, key: String },
    Put { bucket: String, key: String },
}

/// In-memory object store that records every call.
#[derive(Debug, Default)]
pub struct TestStorageClient {
    /// `(bucket, key) -> content`.
    objects: Mutex<BTreeMap<(String, String), Vec<u8>>>,
    calls: Mutex<Vec<Call>>,
    /// Keys whose HEAD fails with a network error.
    failing_heads: Mutex<HashSet<String>>,
    /// Keys whose GET fails with a network error.
    failing_gets: Mutex<HashSet<String>>,
    /// Buckets whose listing fails.
    failing_lists: Mutex<HashSet<String>>,
    /// Source keys whose copy fails.
    failing_copies: Mutex<HashSet<String>>,
    /// Keys whose PUT fails.
    failing_puts: Mutex<HashSet<String>>,
}

impl TestStorageClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an object directly, without recording a call.
    pub fn insert(&self, bucket: &str, key: &str, data: &[u8]) {
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), data.to_vec());
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    pub fn fail_head(&self, key: &str) {
        self.failing_heads.lock().unwrap().insert(key.to_string());
    }

    pub fn fail_get(&self, key: &str) {
        self.failing_gets.lock().unwrap().insert(key.to_string());
    }

    pub fn fail_list(&self, bucket: &str) {
        self.failing_lists.lock().unwrap().insert(bucket.to_string());
    }

    pub fn fail_copy(&self, source_key: &str) {
        self.failing_copies.lock().unwrap().insert(source_key.to_string());
    }

    pub fn fail_put(&self, key: &str) {
        self.failing_puts.lock().unwrap().insert(key.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn heads(&self) -> usize {
        self.count(|c| matches!(c, Call::Head { .. }))
    }

    pub fn copies(&self) -> usize {
        self.count(|c| matches!(c, Call::Copy { .. }))
    }

    pub fn puts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Put { key, .. } => Some(key),
                _ => None,
            })
            .collect()
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn network_error(what: &str, key: &str) -> StorageError {
        StorageError::NetworkError {
            message: format!("injected {} failure for {}", what, key),
        }
    }
}

#[async_trait]
impl StorageClient for TestStorageClient {
    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> Result<Vec<ObjectInfo>, StorageError> {
        self.record(Call::List {
            bucket: bucket.to_string(),
            prefix: prefix.to_string(),
        });

        if self.failing_lists.lock().unwrap().contains(bucket) {
            return Err(Self::network_error("list", bucket));
        }

        Ok(self
            .objects
            .lock()
            .unwrap()
            .iter()
            .filter(|((b, k), _)| b == bucket && k.starts_with(prefix))
            .map(|((_, k), data)| ObjectInfo::new(k.clone(), data.len() as u64))
            .collect())
    }

    async fn head_object(&self, bucket: &str, key: &str) -> Result<Option<u64>, StorageError> {
        self.record(Call::Head {
            bucket: bucket.to_string(),
            key: key.to_string(),
        });

        if self.failing_heads.lock().unwrap().contains(key) {
            return Err(Self::network_error("head", key));
        }

        Ok(self.object(bucket, key).map(|data| data.len() as u64))
    }

    async fn copy_object(
        &self,
        source_bucket: &str,
        source_key: &str,
        target_bucket: &str,
        target_key: &str,
    ) -> Result<(), StorageError> {
        self.record(Call::Copy {
            source_bucket: source_bucket.to_string(),
            source_key: source_key.to_string(),
            target_bucket: target_bucket.to_string(),
            target_key: target_key.to_string(),
        });

        if self.failing_copies.lock().unwrap().contains(source_key) {
            return Err(Self::network_error("copy", source_key));
        }

        let data: Vec<u8> = self
            .object(source_bucket, source_key)
            .ok_or_else(|| StorageError::NotFound {
                bucket: source_bucket.to_string(),
                key: source_key.to_string(),
            })?;
        self.insert(target_bucket, target_key, &data);
        Ok(())
    }

    async fn get_object_to_file(
        &self,
        bucket: &str,
        key: &str,
        file_path: &Path,
    ) -> Result<u64, StorageError> {
        self.record(Call::Get {
            bucket: bucket.to_string(),
            key: key.to_string(),
        });

        if self.failing_gets.lock().unwrap().contains(key) {
            return Err(Self::network_error("get", key));
        }

        let data: Vec<u8> = self.object(bucket, key).ok_or_else(|| StorageError::NotFound {
            bucket: bucket.to_string(),
            key: key.to_string(),
        })?;
        std::fs::write(file_path, &data)
            .map_err(|e| StorageError::io(file_path.display().to_string(), &e))?;
        Ok(data.len() as u64)
    }

    async fn put_object(&self, bucket: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        self.record(Call::Put {
            bucket: bucket.to_string(),
            key: key.to_string(),
        });

        if self.failing_puts.lock().unwrap().contains(key) {
            return Err(Self::network_error("put", key));
        }

        self.insert(bucket, key, data);
        Ok(())
    }
}
