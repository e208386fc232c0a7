//! # Disbursement Errors

use shared_types::{AddressError, Amount, ErrorKind, RecordId};
use tc_01_record_store::{GenesisError, StoreError};
use tc_03_approval_quorum::ApprovalError;
use tc_04_lifecycle::LifecycleError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisbursementError {
    #[error("invalid disbursement: {reason}")]
    Validation { reason: String },

    #[error("invalid disbursement {field} address: {source}")]
    InvalidAddress {
        field: &'static str,
        #[source]
        source: AddressError,
    },

    #[error("procurement #{procurement_id} not found for disbursement")]
    ProcurementMissing { procurement_id: RecordId },

    /// Registering would push the running total past the procurement amount.
    #[error(
        "disbursement of {requested} exceeds procurement #{procurement_id} cap {cap} \
         (already disbursed {disbursed})"
    )]
    AmountExceeded {
        procurement_id: RecordId,
        requested: Amount,
        disbursed: Amount,
        cap: Amount,
    },

    /// Stored running total disagrees with a re-scan of the records.
    #[error(
        "disbursed total for procurement #{procurement_id} is {stored}, records sum to {recomputed}"
    )]
    TotalsInconsistent {
        procurement_id: RecordId,
        stored: Amount,
        recomputed: Amount,
    },

    /// Stored records for one procurement sum past the amount range.
    #[error("disbursed records for procurement #{procurement_id} overflow the amount range")]
    TotalOverflow { procurement_id: RecordId },

    #[error(transparent)]
    Approval(#[from] ApprovalError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Genesis(#[from] GenesisError),
}

impl DisbursementError {
    pub fn validation(reason: impl Into<String>) -> Self {
        DisbursementError::Validation {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DisbursementError::Validation { .. } => ErrorKind::ValidationError,
            DisbursementError::InvalidAddress { .. } => ErrorKind::InvalidAddress,
            DisbursementError::ProcurementMissing { .. } => ErrorKind::ProcurementMissing,
            DisbursementError::AmountExceeded { .. } => ErrorKind::AmountExceeded,
            DisbursementError::TotalsInconsistent { .. } => ErrorKind::Storage,
            DisbursementError::TotalOverflow { .. } => ErrorKind::Storage,
            DisbursementError::Approval(e) => e.kind(),
            DisbursementError::Lifecycle(e) => e.kind(),
            DisbursementError::Store(e) => e.kind(),
            DisbursementError::Genesis(e) => e.kind(),
        }
    }
}

pub type DisbursementResult<T> = Result<T, DisbursementError>;
