//! # Treasury-Chain Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Shared actors, scorecards and records
//! └── integration/      # Cross-keeper flows
//!     ├── accountability_flows.rs
//!     └── genesis_flows.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p tc-tests
//! cargo test -p tc-tests integration::genesis_flows::
//!
//! # Benchmarks
//! cargo bench -p tc-tests
//! ```

pub mod fixtures;
pub mod integration;
