//! # Lifecycle (tc-04)
//!
//! Generic status state machine shared by budgets, procurements and
//! disbursements. Each kind supplies its graph through `LifecycleStatus`;
//! `transition` checks adjacency, runs the quorum for gated targets and
//! hands back the updated record.

pub mod domain;
pub mod service;

pub use domain::{LifecycleError, LifecycleRecord, LifecycleResult, LifecycleStatus};
pub use service::transition;
