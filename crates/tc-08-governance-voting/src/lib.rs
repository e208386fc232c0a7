//! # Governance Voting (tc-08)
//!
//! Scoped delegations: a delegator hands accountability for one scope to a
//! delegatee. One delegation per normalized `(delegator, scope)`;
//! re-registering replaces it under the same id and reactivates it.

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{Delegation, DelegationError, DelegationResult};
pub use ports::GovernanceVotingApi;
pub use service::DelegationKeeper;
