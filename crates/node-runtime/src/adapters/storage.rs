//! # Node Storage
//!
//! The runtime picks one backend for every keeper at startup: the in-memory
//! map when no data directory is configured, otherwise one file per record
//! kind under the data directory.

use std::path::{Path, PathBuf};
use tc_01_record_store::{
    BatchOperation, FileBackedKVStore, InMemoryKVStore, KVStoreError, KeyValueStore, ScanResult,
};
use tracing::info;

/// File name extension for per-kind store files.
pub const STORE_EXTENSION: &str = "tcdb";

#[derive(Debug)]
pub enum NodeStore {
    Memory(InMemoryKVStore),
    File(FileBackedKVStore),
}

impl NodeStore {
    /// Open the store for `name`, file-backed when `data_dir` is set.
    pub fn open(data_dir: Option<&Path>, name: &str) -> Result<Self, KVStoreError> {
        match data_dir {
            None => Ok(NodeStore::Memory(InMemoryKVStore::new())),
            Some(dir) => {
                std::fs::create_dir_all(dir).map_err(|e| KVStoreError::IOError {
                    message: format!("cannot create {}: {}", dir.display(), e),
                })?;
                let path = store_path(dir, name);
                info!("[runtime] 💾 Opening {} store at {}", name, path.display());
                Ok(NodeStore::File(FileBackedKVStore::open(path)?))
            }
        }
    }

    pub fn is_persistent(&self) -> bool {
        matches!(self, NodeStore::File(_))
    }
}

pub fn store_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.{STORE_EXTENSION}"))
}

impl KeyValueStore for NodeStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        match self {
            NodeStore::Memory(kv) => kv.get(key),
            NodeStore::File(kv) => kv.get(key),
        }
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        match self {
            NodeStore::Memory(kv) => kv.put(key, value),
            NodeStore::File(kv) => kv.put(key, value),
        }
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        match self {
            NodeStore::Memory(kv) => kv.delete(key),
            NodeStore::File(kv) => kv.delete(key),
        }
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        match self {
            NodeStore::Memory(kv) => kv.atomic_batch_write(operations),
            NodeStore::File(kv) => kv.atomic_batch_write(operations),
        }
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        match self {
            NodeStore::Memory(kv) => kv.exists(key),
            NodeStore::File(kv) => kv.exists(key),
        }
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
        match self {
            NodeStore::Memory(kv) => kv.prefix_scan(prefix),
            NodeStore::File(kv) => kv.prefix_scan(prefix),
        }
    }
}
