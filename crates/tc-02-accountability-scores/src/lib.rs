//! # Accountability Scores (tc-02)
//!
//! Trust oracle for approvals. Keeps one scorecard per normalized
//! `(subject, metric)` pair; the approval quorum reads them to decide whether
//! a signer is trusted enough to approve.
//!
//! Scores are produced elsewhere and written here through
//! `upsert_scorecard`. Nothing in this crate computes a score.
//!
//! ## Crate Structure
//!
//! - `domain/` - `Scorecard` and its validation
//! - `ports/` - `AccountabilityScoresApi`
//! - `service.rs` - `ScorecardKeeper`

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{Scorecard, ScorecardError, ScorecardResult, MAX_SCORE};
pub use ports::AccountabilityScoresApi;
pub use service::ScorecardKeeper;
