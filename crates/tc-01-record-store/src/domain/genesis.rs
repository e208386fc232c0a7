//! # Genesis Export / Import
//!
//! A collection's genesis is every record plus the sequence value, so ids
//! allocated after an import never collide with imported ones. Import is
//! only accepted into an empty collection and is checked fully before
//! anything is staged.

use crate::domain::batch::WriteBatch;
use crate::domain::collections::RecordCollection;
use crate::domain::errors::{GenesisError, GenesisResult, StoreResult};
use crate::domain::record::{IndexedRecord, Record};
use crate::ports::outbound::KeyValueStore;
use serde::{Deserialize, Serialize};
use shared_types::{RecordId, UNASSIGNED_ID};
use std::collections::BTreeSet;

/// Exported state of one record collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct GenesisState<T> {
    pub records: Vec<T>,
    /// Sequence value at export time.
    pub count: u64,
}

impl<T> Default for GenesisState<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            count: 0,
        }
    }
}

/// Reject id 0, repeated ids and ids the exported sequence never reached.
pub fn validate_genesis_ids<T: Record>(state: &GenesisState<T>) -> GenesisResult<()> {
    let mut seen: BTreeSet<RecordId> = BTreeSet::new();
    for record in &state.records {
        let id = record.id();
        if id == UNASSIGNED_ID {
            return Err(GenesisError::ZeroId { kind: T::KIND });
        }
        if !seen.insert(id) {
            return Err(GenesisError::DuplicateId { kind: T::KIND, id });
        }
        if id > state.count {
            return Err(GenesisError::IdBeyondSequence {
                kind: T::KIND,
                id,
                count: state.count,
            });
        }
    }
    Ok(())
}

/// Reject two records sharing one normalized key.
pub fn validate_genesis_keys<T: IndexedRecord>(state: &GenesisState<T>) -> GenesisResult<()> {
    let mut seen = BTreeSet::new();
    for record in &state.records {
        let key = record.index_key();
        if !seen.insert(key.clone()) {
            return Err(GenesisError::DuplicateKey {
                kind: T::KIND,
                key: key.to_string(),
            });
        }
    }
    Ok(())
}

impl<T: Record> RecordCollection<T> {
    pub fn export<KV: KeyValueStore + ?Sized>(&self, kv: &KV) -> StoreResult<GenesisState<T>> {
        Ok(GenesisState {
            records: self.all(kv)?,
            count: self.sequence().peek(kv)?,
        })
    }

    /// Stage every record and the sequence.
    pub fn import<KV: KeyValueStore + ?Sized>(
        &self,
        kv: &KV,
        batch: &mut WriteBatch,
        state: &GenesisState<T>,
    ) -> GenesisResult<()> {
        if !self.is_empty(kv)? {
            return Err(GenesisError::NonEmptyStore { kind: T::KIND });
        }
        validate_genesis_ids(state)?;

        for record in &state.records {
            self.stage(batch, record)?;
        }
        self.sequence().set(batch, state.count);
        Ok(())
    }
}

impl<T: IndexedRecord> RecordCollection<T> {
    /// Like `import`, also rebuilding the key index.
    pub fn import_indexed<KV: KeyValueStore + ?Sized>(
        &self,
        kv: &KV,
        batch: &mut WriteBatch,
        state: &GenesisState<T>,
    ) -> GenesisResult<()> {
        validate_genesis_keys(state)?;
        self.import(kv, batch, state)?;
        for record in &state.records {
            self.stage_index(batch, &record.index_key(), record.id())?;
        }
        Ok(())
    }
}
