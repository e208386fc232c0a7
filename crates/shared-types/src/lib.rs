//! # Shared Types Crate
//!
//! Value types used by every Treasury-Chain keeper.
//!
//! ## Contents
//!
//! - `address` - the `AddressValidator` port and the default hex codec
//! - `entities` - `Amount` and record identifiers
//! - `keys` - `NormalizedKey` / `CompositeKey` for case-insensitive uniqueness
//! - `errors` - `ErrorKind`, the taxonomy every keeper error maps onto
//! - `test_utils` - deterministic address derivation for fixtures

pub mod address;
pub mod entities;
pub mod errors;
pub mod keys;
pub mod test_utils;

pub use address::{AddressError, AddressValidator, HexAddressCodec};
pub use entities::*;
pub use errors::*;
pub use keys::{CompositeKey, NormalizedKey};
