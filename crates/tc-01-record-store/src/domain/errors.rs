//! # Store Errors
//!
//! `KVStoreError` is what a backend reports. `StoreError` is what typed
//! collections report to keepers. `GenesisError` covers malformed exports.

use shared_types::{ErrorKind, RecordId};
use thiserror::Error;

/// Key-value backend errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },

    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },
}

/// Typed collection errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No record with this id.
    #[error("{kind} #{id} not found")]
    NotFound { kind: &'static str, id: RecordId },

    /// No record indexed under this key.
    #[error("{kind} not found for key {key}")]
    KeyNotFound { kind: &'static str, key: String },

    /// Backend failure.
    #[error("Database error: {0}")]
    Backend(#[from] KVStoreError),

    /// Stored bytes could not be decoded, or a record could not be encoded.
    #[error("Serialization error for {kind}: {message}")]
    Serialization { kind: &'static str, message: String },

    /// A record without an id reached a write path that requires one.
    #[error("{kind} must have an id before it is written")]
    UnassignedId { kind: &'static str },

    /// The sequence counter cannot advance.
    #[error("{kind} sequence exhausted")]
    SequenceExhausted { kind: &'static str },

    /// Key lookup on a collection built without `with_index`.
    #[error("{kind} collection has no secondary index")]
    MissingIndex { kind: &'static str },
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::NotFound { .. } | StoreError::KeyNotFound { .. } => ErrorKind::NotFound,
            _ => ErrorKind::Storage,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

/// Genesis import rejected before any write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenesisError {
    #[error("{kind} genesis contains a record with id 0")]
    ZeroId { kind: &'static str },

    #[error("duplicate {kind} id {id} during genesis")]
    DuplicateId { kind: &'static str, id: RecordId },

    #[error("{kind} id {id} exceeds exported sequence {count}")]
    IdBeyondSequence {
        kind: &'static str,
        id: RecordId,
        count: u64,
    },

    #[error("duplicate {kind} key {key} during genesis")]
    DuplicateKey { kind: &'static str, key: String },

    #[error("{kind} store is not empty; genesis import requires an empty store")]
    NonEmptyStore { kind: &'static str },

    #[error("invalid {kind} #{id} in genesis: {reason}")]
    InvalidRecord {
        kind: &'static str,
        id: RecordId,
        reason: String,
    },

    #[error("{kind} genesis total mismatch for #{id}: exported {exported}, recomputed {recomputed}")]
    TotalMismatch {
        kind: &'static str,
        id: RecordId,
        exported: String,
        recomputed: String,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl GenesisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenesisError::Store(e) => e.kind(),
            _ => ErrorKind::ValidationError,
        }
    }
}

pub type GenesisResult<T> = Result<T, GenesisError>;

pub type StoreResult<T> = Result<T, StoreError>;
