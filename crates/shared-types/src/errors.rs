//! # Error Kinds
//!
//! Every keeper defines its own error enum. Each one maps onto `ErrorKind` so
//! callers can branch on the failure class without matching crate-specific
//! variants.

use std::fmt;

/// Failure classes shared by all keepers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Record, scorecard or delegation does not exist.
    NotFound,
    /// An address field failed to decode.
    InvalidAddress,
    /// A field is malformed or missing.
    ValidationError,
    /// Record has no liability contract URI where one is required.
    LiabilityContractMissing,
    /// Approval set would contain a repeated role or signer.
    DuplicateApproval,
    /// Fewer approvals than the quorum requires.
    ApprovalThreshold,
    /// Backing scorecard could not be resolved.
    ApprovalScoreLookupFailed,
    /// Backing scorecard belongs to a different subject than the signer.
    ApprovalScoreMismatch,
    /// Backing scorecard score is under the admission threshold.
    ApprovalScoreBelowThreshold,
    /// Requested status is not adjacent to the current status.
    InvalidTransition,
    /// Procurement references a budget that does not exist.
    BudgetMissing,
    /// Disbursement references a procurement that does not exist.
    ProcurementMissing,
    /// Disbursement would push the cumulative total over the procurement amount.
    AmountExceeded,
    /// Unexpected failure in the storage backend.
    Storage,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::InvalidAddress => "invalid_address",
            ErrorKind::ValidationError => "validation_error",
            ErrorKind::LiabilityContractMissing => "liability_contract_missing",
            ErrorKind::DuplicateApproval => "duplicate_approval",
            ErrorKind::ApprovalThreshold => "approval_threshold",
            ErrorKind::ApprovalScoreLookupFailed => "approval_score_lookup_failed",
            ErrorKind::ApprovalScoreMismatch => "approval_score_mismatch",
            ErrorKind::ApprovalScoreBelowThreshold => "approval_score_below_threshold",
            ErrorKind::InvalidTransition => "invalid_transition",
            ErrorKind::BudgetMissing => "budget_missing",
            ErrorKind::ProcurementMissing => "procurement_missing",
            ErrorKind::AmountExceeded => "amount_exceeded",
            ErrorKind::Storage => "storage",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
