//! # Adapters Module
//!
//! Backends for the `KeyValueStore` port.

pub mod storage;

pub use storage::{FileBackedKVStore, InMemoryKVStore};
