//! Deterministic fixtures shared by unit and integration tests.

use crate::address::{AddressValidator, HexAddressCodec};
use sha2::{Digest, Sha256};

/// First 20 bytes of `sha256(seed)`.
pub fn derive_raw_address(seed: &str) -> [u8; 20] {
    let digest = Sha256::digest(seed.as_bytes());
    let mut raw = [0u8; 20];
    raw.copy_from_slice(&digest[..20]);
    raw
}

/// Address string for `seed` under the default hex codec.
pub fn derive_address(seed: &str) -> String {
    format!("0x{}", hex::encode(derive_raw_address(seed)))
}

/// Address string for `seed` under an arbitrary codec.
pub fn derive_address_with(codec: &HexAddressCodec, seed: &str) -> String {
    let raw = derive_raw_address(seed);
    let mut payload = vec![0u8; codec.byte_len()];
    let n = payload.len().min(raw.len());
    payload[..n].copy_from_slice(&raw[..n]);
    codec
        .bytes_to_string(&payload)
        .unwrap_or_else(|_| format!("{}{}", codec.prefix(), hex::encode(&payload)))
}
