//! # Procurement Errors

use shared_types::{AddressError, ErrorKind, RecordId};
use tc_01_record_store::{GenesisError, StoreError};
use tc_03_approval_quorum::ApprovalError;
use tc_04_lifecycle::LifecycleError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcurementError {
    #[error("invalid procurement: {reason}")]
    Validation { reason: String },

    #[error("invalid procurement {field} address: {source}")]
    InvalidAddress {
        field: &'static str,
        #[source]
        source: AddressError,
    },

    /// The referenced budget does not exist.
    #[error("budget #{budget_id} not found for procurement")]
    BudgetMissing { budget_id: RecordId },

    #[error(transparent)]
    Approval(#[from] ApprovalError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Genesis(#[from] GenesisError),
}

impl ProcurementError {
    pub fn validation(reason: impl Into<String>) -> Self {
        ProcurementError::Validation {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ProcurementError::Validation { .. } => ErrorKind::ValidationError,
            ProcurementError::InvalidAddress { .. } => ErrorKind::InvalidAddress,
            ProcurementError::BudgetMissing { .. } => ErrorKind::BudgetMissing,
            ProcurementError::Approval(e) => e.kind(),
            ProcurementError::Lifecycle(e) => e.kind(),
            ProcurementError::Store(e) => e.kind(),
            ProcurementError::Genesis(e) => e.kind(),
        }
    }
}

pub type ProcurementResult<T> = Result<T, ProcurementError>;
