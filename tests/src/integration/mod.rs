//! # Integration Flows
//!
//! Budgets, procurements and disbursements moving through their lifecycles
//! with real keepers on both sides of every collaborator port.

pub mod accountability_flows;
pub mod genesis_flows;
