//! # Address Validation Port
//!
//! Keepers never parse addresses themselves. They hold an
//! `Arc<dyn AddressValidator>` and ask it whether a string is well formed.
//!
//! The default implementation is `HexAddressCodec`: a fixed prefix followed by
//! the hex encoding of a fixed-length byte string (`0x` + 20 bytes).

use thiserror::Error;

/// Errors raised while decoding an address string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Address string is empty.
    #[error("address is empty")]
    Empty,

    /// Address does not start with the configured prefix.
    #[error("address {address} must start with {expected}")]
    MissingPrefix { address: String, expected: String },

    /// Payload is not valid hex.
    #[error("address {address} is not valid hex: {reason}")]
    InvalidEncoding { address: String, reason: String },

    /// Decoded payload has the wrong length.
    #[error("address must decode to {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// Converts between address strings and raw bytes.
pub trait AddressValidator: Send + Sync {
    /// Decode an address string, failing if it is malformed.
    fn string_to_bytes(&self, address: &str) -> Result<Vec<u8>, AddressError>;

    /// Encode raw bytes as an address string.
    fn bytes_to_string(&self, raw: &[u8]) -> Result<String, AddressError>;

    /// Convenience probe used by keepers before any write.
    fn validate(&self, address: &str) -> Result<(), AddressError> {
        self.string_to_bytes(address).map(|_| ())
    }
}

/// Prefixed hex address codec.
#[derive(Debug, Clone)]
pub struct HexAddressCodec {
    prefix: String,
    byte_len: usize,
}

impl HexAddressCodec {
    /// Create a codec with a custom prefix and payload length.
    pub fn new(prefix: impl Into<String>, byte_len: usize) -> Self {
        Self {
            prefix: prefix.into(),
            byte_len,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn byte_len(&self) -> usize {
        self.byte_len
    }
}

impl Default for HexAddressCodec {
    fn default() -> Self {
        Self::new("0x", 20)
    }
}

impl AddressValidator for HexAddressCodec {
    fn string_to_bytes(&self, address: &str) -> Result<Vec<u8>, AddressError> {
        let trimmed = address.trim();
        if trimmed.is_empty() {
            return Err(AddressError::Empty);
        }

        let payload = trimmed
            .strip_prefix(self.prefix.as_str())
            .ok_or_else(|| AddressError::MissingPrefix {
                address: trimmed.to_string(),
                expected: self.prefix.clone(),
            })?;

        let raw = hex::decode(payload).map_err(|e| AddressError::InvalidEncoding {
            address: trimmed.to_string(),
            reason: e.to_string(),
        })?;

        if raw.len() != self.byte_len {
            return Err(AddressError::InvalidLength {
                expected: self.byte_len,
                actual: raw.len(),
            });
        }

        Ok(raw)
    }

    fn bytes_to_string(&self, raw: &[u8]) -> Result<String, AddressError> {
        if raw.len() != self.byte_len {
            return Err(AddressError::InvalidLength {
                expected: self.byte_len,
                actual: raw.len(),
            });
        }
        Ok(format!("{}{}", self.prefix, hex::encode(raw)))
    }
}
