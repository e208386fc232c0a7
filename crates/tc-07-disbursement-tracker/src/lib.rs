//! # Disbursement Tracker (tc-07)
//!
//! Disbursements release funds against a procurement. The keeper keeps a
//! running total per procurement and refuses any registration that would
//! push it past the procurement's amount.
//!
//! ## Lifecycle
//!
//! ```text
//! Scheduled ──► Released* ──► Verified* ──► Resolved*
//!     │             │                          ▲
//!     └─────────────┴──► Disputed ─────────────┘
//! ```
//!
//! `*` marks stages that require a quorum.
//!
//! ## Invariant
//!
//! For every procurement, the stored total equals the sum of its
//! disbursement amounts and never exceeds the procurement amount.
//! `verify_disbursed_totals` re-checks the first half by full re-scan.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::InMemoryProcurements;
pub use domain::{
    sum_by_procurement, DisbursedTotal, Disbursement, DisbursementError, DisbursementGenesis,
    DisbursementResult, DisbursementStatus,
};
pub use ports::{DisbursementTrackerApi, ProcurementProvider};
pub use service::DisbursementKeeper;
