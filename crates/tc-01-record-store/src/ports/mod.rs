//! # Ports Layer
//!
//! Only an outbound port: the storage backend. Keepers are the inbound side.

pub mod outbound;

pub use outbound::{BatchOperation, KeyValueStore, ScanResult};
