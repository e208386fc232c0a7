//! # Key Layout
//!
//! Every collection owns one prefix byte inside its keeper's store.
//!
//! | Layout | Value |
//! |--------|-------|
//! | `[records][id:u64 BE]` | bincode record |
//! | `[sequence]` | last assigned id, u64 BE |
//! | `[index][composite key bytes]` | id, u64 BE |
//! | `[map][id:u64 BE]` | bincode value |
//!
//! Big-endian ids make byte order equal numeric order, so a prefix scan walks
//! records ascending by id.

use crate::domain::errors::{StoreError, StoreResult};
use shared_types::{CompositeKey, RecordId};

/// Build `[prefix][id BE]`.
pub fn id_key(prefix: u8, id: RecordId) -> Vec<u8> {
    let mut key = Vec::with_capacity(9);
    key.push(prefix);
    key.extend_from_slice(&id.to_be_bytes());
    key
}

/// Build `[prefix][composite bytes]`.
pub fn composite_key(prefix: u8, composite: &CompositeKey) -> Vec<u8> {
    let mut key = vec![prefix];
    key.extend_from_slice(&composite.to_bytes());
    key
}

/// Recover the id from an `id_key`.
pub fn decode_id_key(kind: &'static str, key: &[u8]) -> StoreResult<RecordId> {
    let bytes: [u8; 8] = key
        .get(1..9)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| StoreError::Serialization {
            kind,
            message: format!("malformed id key of length {}", key.len()),
        })?;
    Ok(RecordId::from_be_bytes(bytes))
}

/// Encode a u64 counter or index value.
pub fn encode_u64(value: u64) -> Vec<u8> {
    value.to_be_bytes().to_vec()
}

/// Decode a u64 counter or index value.
pub fn decode_u64(kind: &'static str, bytes: &[u8]) -> StoreResult<u64> {
    let arr: [u8; 8] = bytes.try_into().map_err(|_| StoreError::Serialization {
        kind,
        message: format!("expected 8 bytes, got {}", bytes.len()),
    })?;
    Ok(u64::from_be_bytes(arr))
}
