//! # Write Batch
//!
//! Keepers validate first and stage every write here. Nothing reaches the
//! backend until `commit`, which hands the whole batch to
//! `KeyValueStore::atomic_batch_write`. Dropping a batch discards it.

use crate::domain::errors::StoreResult;
use crate::ports::outbound::{BatchOperation, KeyValueStore};

#[derive(Debug, Default)]
pub struct WriteBatch {
    operations: Vec<BatchOperation>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.operations.push(BatchOperation::put(key, value));
    }

    pub fn delete(&mut self, key: Vec<u8>) {
        self.operations.push(BatchOperation::delete(key));
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn operations(&self) -> &[BatchOperation] {
        &self.operations
    }

    /// Apply every staged operation in one atomic write.
    pub fn commit<KV: KeyValueStore + ?Sized>(self, kv: &mut KV) -> StoreResult<()> {
        if self.operations.is_empty() {
            return Ok(());
        }
        kv.atomic_batch_write(self.operations)?;
        Ok(())
    }
}
