//! # Approval Quorum (tc-03)
//!
//! Approvals are signed endorsements embedded in budgets, procurements and
//! disbursements. Each one is bound to the record's liability contract and
//! backed by a scorecard whose subject is the signer.
//!
//! ## Rules
//!
//! | Rule | Error |
//! |------|-------|
//! | Record must name a liability contract | `LiabilityContractMissing` |
//! | One approval per normalized role and per normalized signer | replace-on-conflict, then `DuplicateApproval` |
//! | Backing scorecard exists | `ScoreLookupFailed` |
//! | Scorecard subject equals signer | `ScoreMismatch` |
//! | Score at least `min_score` (80) | `ScoreBelowThreshold` |
//! | At least `min_approvals` (2) before a gated transition | `ApprovalThreshold` |
//!
//! The validator is stateless apart from its config. Scorecards come from a
//! `ScorecardReader` passed into each call.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::InMemoryScorecards;
pub use domain::{
    validate_approvals, Approvable, Approval, ApprovalError, ApprovalResult, QuorumConfig,
};
pub use ports::{ApprovalQuorumApi, ScorecardReader};
pub use service::QuorumValidator;
