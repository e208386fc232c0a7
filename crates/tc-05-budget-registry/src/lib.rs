//! # Budget Registry (tc-05)
//!
//! Budgets are the root of the record graph: procurements draw against them.
//!
//! ## Lifecycle
//!
//! ```text
//! Draft ──► Legislated ──► Executing ──► Completed
//!   │            │             │             │
//!   └────────────┴─────────────┴─────────────┴──► Archived
//! ```
//!
//! Every move out of `Draft` requires a quorum of trusted approvals bound to
//! the budget's liability contract.

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{Budget, BudgetError, BudgetResult, BudgetStatus};
pub use ports::BudgetRegistryApi;
pub use service::BudgetKeeper;
