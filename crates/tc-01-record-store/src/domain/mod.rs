//! # Domain Layer
//!
//! Typed collections over a byte-level store.

pub mod batch;
pub mod collections;
pub mod errors;
pub mod genesis;
pub mod keys;
pub mod record;

pub use batch::WriteBatch;
pub use collections::{RecordCollection, Sequence, ValueMap};
pub use errors::{GenesisError, GenesisResult, KVStoreError, StoreError, StoreResult};
pub use genesis::{validate_genesis_ids, validate_genesis_keys, GenesisState};
pub use record::{IndexedRecord, Record};
