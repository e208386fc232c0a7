//! # Typed Collections
//!
//! Stateless descriptors that know a collection's prefix bytes. Reads go
//! straight to the backend; writes are staged into a `WriteBatch`.
//!
//! A sequence reads its current value from the backend, not from the pending
//! batch, so a single batch may allocate at most one id per collection.

use crate::domain::batch::WriteBatch;
use crate::domain::errors::{StoreError, StoreResult};
use crate::domain::keys::{composite_key, decode_id_key, decode_u64, encode_u64, id_key};
use crate::domain::record::{IndexedRecord, Record};
use crate::ports::outbound::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{CompositeKey, RecordId, UNASSIGNED_ID};
use std::marker::PhantomData;
use std::ops::ControlFlow;

fn encode<V: Serialize>(kind: &'static str, value: &V) -> StoreResult<Vec<u8>> {
    bincode::serialize(value).map_err(|e| StoreError::Serialization {
        kind,
        message: e.to_string(),
    })
}

fn decode<V: DeserializeOwned>(kind: &'static str, bytes: &[u8]) -> StoreResult<V> {
    bincode::deserialize(bytes).map_err(|e| StoreError::Serialization {
        kind,
        message: e.to_string(),
    })
}

/// Per-kind monotonic counter holding the last assigned id.
#[derive(Debug, Clone, Copy)]
pub struct Sequence {
    kind: &'static str,
    prefix: u8,
}

impl Sequence {
    pub const fn new(kind: &'static str, prefix: u8) -> Self {
        Self { kind, prefix }
    }

    /// Last assigned value, 0 if nothing was ever allocated.
    pub fn peek<KV: KeyValueStore + ?Sized>(&self, kv: &KV) -> StoreResult<u64> {
        match kv.get(&[self.prefix])? {
            Some(bytes) => decode_u64(self.kind, &bytes),
            None => Ok(0),
        }
    }

    /// Stage the next value (first allocation returns 1).
    pub fn next<KV: KeyValueStore + ?Sized>(
        &self,
        kv: &KV,
        batch: &mut WriteBatch,
    ) -> StoreResult<u64> {
        let next = self
            .peek(kv)?
            .checked_add(1)
            .ok_or(StoreError::SequenceExhausted { kind: self.kind })?;
        self.set(batch, next);
        Ok(next)
    }

    pub fn set(&self, batch: &mut WriteBatch, value: u64) {
        batch.put(vec![self.prefix], encode_u64(value));
    }
}

/// `id → record` map with its sequence and an optional secondary index.
#[derive(Debug, Clone, Copy)]
pub struct RecordCollection<T> {
    records: u8,
    sequence: Sequence,
    index: Option<u8>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Record> RecordCollection<T> {
    pub const fn new(records_prefix: u8, sequence_prefix: u8) -> Self {
        Self {
            records: records_prefix,
            sequence: Sequence::new(T::KIND, sequence_prefix),
            index: None,
            _marker: PhantomData,
        }
    }

    pub const fn with_index(mut self, index_prefix: u8) -> Self {
        self.index = Some(index_prefix);
        self
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// Fetch a record, `NotFound` if absent.
    pub fn get<KV: KeyValueStore + ?Sized>(&self, kv: &KV, id: RecordId) -> StoreResult<T> {
        self.find(kv, id)?
            .ok_or(StoreError::NotFound { kind: T::KIND, id })
    }

    pub fn find<KV: KeyValueStore + ?Sized>(
        &self,
        kv: &KV,
        id: RecordId,
    ) -> StoreResult<Option<T>> {
        match kv.get(&id_key(self.records, id))? {
            Some(bytes) => decode(T::KIND, &bytes).map(Some),
            None => Ok(None),
        }
    }

    pub fn exists<KV: KeyValueStore + ?Sized>(&self, kv: &KV, id: RecordId) -> StoreResult<bool> {
        Ok(kv.exists(&id_key(self.records, id))?)
    }

    /// Assign an id if the record has none, then stage it.
    pub fn put<KV: KeyValueStore + ?Sized>(
        &self,
        kv: &KV,
        batch: &mut WriteBatch,
        record: &mut T,
    ) -> StoreResult<RecordId> {
        if record.id() == UNASSIGNED_ID {
            let id = self.sequence.next(kv, batch)?;
            record.set_id(id);
        }
        self.stage(batch, record)?;
        Ok(record.id())
    }

    /// Stage a record that already carries its id.
    pub fn stage(&self, batch: &mut WriteBatch, record: &T) -> StoreResult<()> {
        if record.id() == UNASSIGNED_ID {
            return Err(StoreError::UnassignedId { kind: T::KIND });
        }
        batch.put(id_key(self.records, record.id()), encode(T::KIND, record)?);
        Ok(())
    }

    /// Ascending-by-id visit; the visitor returns `ControlFlow::Break` to stop.
    pub fn walk<KV, E, F>(&self, kv: &KV, mut visit: F) -> Result<(), E>
    where
        KV: KeyValueStore + ?Sized,
        E: From<StoreError>,
        F: FnMut(T) -> Result<ControlFlow<()>, E>,
    {
        for item in self.iter(kv)? {
            if visit(item?)?.is_break() {
                break;
            }
        }
        Ok(())
    }

    /// Lazily decoded records, ascending by id.
    pub fn iter<KV: KeyValueStore + ?Sized>(
        &self,
        kv: &KV,
    ) -> StoreResult<impl Iterator<Item = StoreResult<T>>> {
        let entries = kv.prefix_scan(&[self.records])?;
        Ok(entries
            .into_iter()
            .map(|(_, value)| decode::<T>(T::KIND, &value)))
    }

    /// Every id currently stored, ascending.
    pub fn ids<KV: KeyValueStore + ?Sized>(&self, kv: &KV) -> StoreResult<Vec<RecordId>> {
        kv.prefix_scan(&[self.records])?
            .iter()
            .map(|(key, _)| decode_id_key(T::KIND, key))
            .collect()
    }

    /// Collect every record, ascending by id.
    pub fn all<KV: KeyValueStore + ?Sized>(&self, kv: &KV) -> StoreResult<Vec<T>> {
        self.iter(kv)?.collect()
    }

    /// True if no record was ever allocated or imported.
    pub fn is_empty<KV: KeyValueStore + ?Sized>(&self, kv: &KV) -> StoreResult<bool> {
        Ok(self.sequence.peek(kv)? == 0 && kv.prefix_scan(&[self.records])?.is_empty())
    }
}

impl<T: IndexedRecord> RecordCollection<T> {
    fn index_prefix(&self) -> StoreResult<u8> {
        self.index.ok_or(StoreError::MissingIndex { kind: T::KIND })
    }

    /// Id indexed under `key`, if any.
    pub fn lookup<KV: KeyValueStore + ?Sized>(
        &self,
        kv: &KV,
        key: &CompositeKey,
    ) -> StoreResult<Option<RecordId>> {
        match kv.get(&composite_key(self.index_prefix()?, key))? {
            Some(bytes) => decode_u64(T::KIND, &bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Record indexed under `key`, `KeyNotFound` if absent.
    pub fn get_by_key<KV: KeyValueStore + ?Sized>(
        &self,
        kv: &KV,
        key: &CompositeKey,
    ) -> StoreResult<T> {
        let id = self
            .lookup(kv, key)?
            .ok_or_else(|| StoreError::KeyNotFound {
                kind: T::KIND,
                key: key.to_string(),
            })?;
        self.get(kv, id)
    }

    /// Upsert-by-key: reuse the id already indexed under the record's key,
    /// otherwise keep the record's own id, otherwise allocate one.
    ///
    /// If the record's id previously pointed at a different key, the stale
    /// index entry is removed.
    pub fn upsert<KV: KeyValueStore + ?Sized>(
        &self,
        kv: &KV,
        batch: &mut WriteBatch,
        record: &mut T,
    ) -> StoreResult<RecordId> {
        let key = record.index_key();

        if let Some(existing) = self.lookup(kv, &key)? {
            record.set_id(existing);
        } else if record.id() != UNASSIGNED_ID {
            if let Some(previous) = self.find(kv, record.id())? {
                let previous_key = previous.index_key();
                if previous_key != key {
                    batch.delete(composite_key(self.index_prefix()?, &previous_key));
                }
            }
        }

        let id = self.put(kv, batch, record)?;
        self.stage_index(batch, &key, id)?;
        Ok(id)
    }

    /// Stage the `key → id` index entry.
    pub fn stage_index(
        &self,
        batch: &mut WriteBatch,
        key: &CompositeKey,
        id: RecordId,
    ) -> StoreResult<()> {
        batch.put(composite_key(self.index_prefix()?, key), encode_u64(id));
        Ok(())
    }
}

/// `id → value` auxiliary map, e.g. per-procurement running totals.
#[derive(Debug, Clone, Copy)]
pub struct ValueMap<V> {
    kind: &'static str,
    prefix: u8,
    _marker: PhantomData<fn() -> V>,
}

impl<V: Serialize + DeserializeOwned> ValueMap<V> {
    pub const fn new(kind: &'static str, prefix: u8) -> Self {
        Self {
            kind,
            prefix,
            _marker: PhantomData,
        }
    }

    pub fn get<KV: KeyValueStore + ?Sized>(&self, kv: &KV, id: RecordId) -> StoreResult<Option<V>> {
        match kv.get(&id_key(self.prefix, id))? {
            Some(bytes) => decode(self.kind, &bytes).map(Some),
            None => Ok(None),
        }
    }

    pub fn stage(&self, batch: &mut WriteBatch, id: RecordId, value: &V) -> StoreResult<()> {
        batch.put(id_key(self.prefix, id), encode(self.kind, value)?);
        Ok(())
    }

    /// Every entry ascending by id.
    pub fn entries<KV: KeyValueStore + ?Sized>(&self, kv: &KV) -> StoreResult<Vec<(RecordId, V)>> {
        kv.prefix_scan(&[self.prefix])?
            .into_iter()
            .map(|(key, value)| Ok((decode_id_key(self.kind, &key)?, decode(self.kind, &value)?)))
            .collect()
    }
}
