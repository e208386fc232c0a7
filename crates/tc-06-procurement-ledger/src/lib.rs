//! # Procurement Ledger (tc-06)
//!
//! Procurements are tenders and contracts funded by a registered budget.
//! Registration fails with `BudgetMissing` unless the budget resolves through
//! the `BudgetProvider` passed in.
//!
//! ## Lifecycle
//!
//! ```text
//! Planning ──► Tendering ──► Awarded* ──► Executing* ──► Completed*
//!     └────────────┴────────────┴────────────┴──────────► Cancelled
//! ```
//!
//! `*` marks stages that require a quorum.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::InMemoryBudgets;
pub use domain::{Procurement, ProcurementError, ProcurementResult, ProcurementStatus};
pub use ports::{BudgetProvider, ProcurementLedgerApi};
pub use service::ProcurementKeeper;
