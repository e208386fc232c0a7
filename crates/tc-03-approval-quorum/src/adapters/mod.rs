//! # Adapters
//!
//! `ScorecardReader` over the real scorecard keeper, plus a map-backed double.

mod keeper;
mod memory;

pub use memory::InMemoryScorecards;
