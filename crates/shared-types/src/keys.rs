//! # Normalized Keys
//!
//! Uniqueness for scorecards, delegations and approval roles/signers is
//! case-insensitive and ignores surrounding whitespace.
//!
//! `CompositeKey` pairs two normalized parts. Its byte encoding length-prefixes
//! each part, so no character inside a part can be confused with a separator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A trimmed, lowercased string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NormalizedKey(String);

impl NormalizedKey {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for NormalizedKey {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for NormalizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Two-part normalized key, ordered by `primary` then `secondary`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CompositeKey {
    pub primary: NormalizedKey,
    pub secondary: NormalizedKey,
}

impl CompositeKey {
    pub fn new(primary: &str, secondary: &str) -> Self {
        Self {
            primary: NormalizedKey::new(primary),
            secondary: NormalizedKey::new(secondary),
        }
    }

    /// Storage encoding: `[len_a:u32 BE][a][len_b:u32 BE][b]`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let a = self.primary.as_str().as_bytes();
        let b = self.secondary.as_str().as_bytes();
        let mut out = Vec::with_capacity(8 + a.len() + b.len());
        out.extend_from_slice(&(a.len() as u32).to_be_bytes());
        out.extend_from_slice(a);
        out.extend_from_slice(&(b.len() as u32).to_be_bytes());
        out.extend_from_slice(b);
        out
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.primary, self.secondary)
    }
}
