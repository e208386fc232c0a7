use super::memory::{apply, scan};
use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{BatchOperation, KeyValueStore, ScanResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File-backed key-value store.
///
/// Holds everything in memory and rewrites the whole file after every
/// successful write, via a temp file and rename. A crash leaves either the
/// old or the new file, never a half-applied batch.
#[derive(Debug)]
pub struct FileBackedKVStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
    path: PathBuf,
}

fn io_error(e: std::io::Error) -> KVStoreError {
    KVStoreError::IOError {
        message: e.to_string(),
    }
}

impl FileBackedKVStore {
    /// Open the store at `path`, loading existing contents if the file exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, KVStoreError> {
        let path = path.as_ref().to_path_buf();

        let data = if path.exists() {
            let bytes = std::fs::read(&path).map_err(io_error)?;
            let data = Self::decode(&bytes)?;
            info!(
                "[tc-01] 💾 Loaded {} keys from {} ({} bytes)",
                data.len(),
                path.display(),
                bytes.len()
            );
            data
        } else {
            info!("[tc-01] 📁 No existing storage file at {}", path.display());
            BTreeMap::new()
        };

        Ok(Self { data, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // Format: repeated [key_len:u32 LE][key][value_len:u32 LE][value]
    fn decode(bytes: &[u8]) -> Result<BTreeMap<Vec<u8>, Vec<u8>>, KVStoreError> {
        let mut data = BTreeMap::new();
        let mut cursor = 0;

        let take = |cursor: &mut usize| -> Result<Vec<u8>, KVStoreError> {
            let len_bytes: [u8; 4] = bytes
                .get(*cursor..*cursor + 4)
                .and_then(|s| s.try_into().ok())
                .ok_or_else(|| KVStoreError::CorruptionError {
                    message: format!("truncated length at offset {}", *cursor),
                })?;
            *cursor += 4;
            let len = u32::from_le_bytes(len_bytes) as usize;
            let chunk = bytes
                .get(*cursor..*cursor + len)
                .ok_or_else(|| KVStoreError::CorruptionError {
                    message: format!("truncated entry at offset {}", *cursor),
                })?
                .to_vec();
            *cursor += len;
            Ok(chunk)
        };

        while cursor < bytes.len() {
            let key = take(&mut cursor)?;
            let value = take(&mut cursor)?;
            data.insert(key, value);
        }

        Ok(data)
    }

    fn save_to_file(&self) -> Result<(), KVStoreError> {
        use std::io::Write;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }

        let mut bytes = Vec::new();
        for (key, value) in &self.data {
            bytes.extend_from_slice(&(key.len() as u32).to_le_bytes());
            bytes.extend_from_slice(key);
            bytes.extend_from_slice(&(value.len() as u32).to_le_bytes());
            bytes.extend_from_slice(value);
        }

        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path).map_err(io_error)?;
        file.write_all(&bytes).map_err(io_error)?;
        file.sync_all().map_err(io_error)?;
        std::fs::rename(&temp_path, &self.path).map_err(io_error)?;

        debug!(
            "[tc-01] 💾 Flushed {} keys to {}",
            self.data.len(),
            self.path.display()
        );
        Ok(())
    }
}

impl KeyValueStore for FileBackedKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.atomic_batch_write(vec![BatchOperation::put(key, value)])
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        self.atomic_batch_write(vec![BatchOperation::delete(key)])
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        let mut next = self.data.clone();
        apply(&mut next, operations);
        let previous = std::mem::replace(&mut self.data, next);
        if let Err(e) = self.save_to_file() {
            self.data = previous;
            return Err(e);
        }
        Ok(())
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.data.contains_key(key))
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
        Ok(scan(&self.data, prefix))
    }
}
