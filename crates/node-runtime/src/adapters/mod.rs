//! # Runtime Adapters

pub mod storage;

pub use storage::NodeStore;
