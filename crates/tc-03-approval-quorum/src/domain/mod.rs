pub mod approval;
pub mod config;
pub mod errors;

pub use approval::{validate_approvals, Approvable, Approval};
pub use config::QuorumConfig;
pub use errors::{ApprovalError, ApprovalResult};
