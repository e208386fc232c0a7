//! # Record Store (tc-01)
//!
//! Durable, typed persistence for every record kind in the engine.
//!
//! ## Model
//!
//! A keeper owns one `KeyValueStore`. Inside it each collection is a
//! prefix-scoped map:
//!
//! - `RecordCollection<T>`: `id → record`, a per-kind `Sequence`, and for
//!   `IndexedRecord`s a normalized `CompositeKey → id` index.
//! - `ValueMap<V>`: `id → value` for derived data such as running totals.
//!
//! ## Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Ids start at 1, strictly increase, never reused | `Sequence::next` |
//! | Operations are all-or-nothing | Writes are staged in a `WriteBatch`, committed once |
//! | Iteration is ascending by id | Big-endian id keys, ordered prefix scans |
//! | A normalized key maps to at most one record | `RecordCollection::upsert` |
//!
//! ## Usage
//!
//! ```ignore
//! use tc_01_record_store::{InMemoryKVStore, RecordCollection, WriteBatch};
//!
//! const ITEMS: RecordCollection<Item> = RecordCollection::new(0x01, 0x02);
//!
//! let mut kv = InMemoryKVStore::new();
//! let mut batch = WriteBatch::new();
//! let id = ITEMS.put(&kv, &mut batch, &mut item)?;
//! batch.commit(&mut kv)?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::{FileBackedKVStore, InMemoryKVStore};
pub use domain::{
    validate_genesis_ids, validate_genesis_keys, GenesisError, GenesisResult, GenesisState,
    IndexedRecord, KVStoreError, Record, RecordCollection, Sequence, StoreError, StoreResult,
    ValueMap, WriteBatch,
};
pub use ports::{BatchOperation, KeyValueStore, ScanResult};
