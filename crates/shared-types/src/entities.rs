//! # Core Value Types
//!
//! Identifiers and monetary amounts shared by all record kinds.

// Re-export U256 from primitive-types for use across all keepers
pub use primitive_types::U256;

/// Non-negative monetary amount in the record's currency minor units.
pub type Amount = U256;

/// Identifier assigned by a per-kind sequence. Zero means "not yet assigned".
pub type RecordId = u64;

/// Sentinel for records that have not been persisted yet.
pub const UNASSIGNED_ID: RecordId = 0;

/// Returns true if a string is empty after trimming whitespace.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
