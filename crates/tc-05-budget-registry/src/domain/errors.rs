//! # Budget Errors

use shared_types::{AddressError, ErrorKind};
use tc_01_record_store::{GenesisError, StoreError};
use tc_03_approval_quorum::ApprovalError;
use tc_04_lifecycle::LifecycleError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    #[error("invalid budget: {reason}")]
    Validation { reason: String },

    #[error("invalid budget {field} address: {source}")]
    InvalidAddress {
        field: &'static str,
        #[source]
        source: AddressError,
    },

    #[error(transparent)]
    Approval(#[from] ApprovalError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Genesis(#[from] GenesisError),
}

impl BudgetError {
    pub fn validation(reason: impl Into<String>) -> Self {
        BudgetError::Validation {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            BudgetError::Validation { .. } => ErrorKind::ValidationError,
            BudgetError::InvalidAddress { .. } => ErrorKind::InvalidAddress,
            BudgetError::Approval(e) => e.kind(),
            BudgetError::Lifecycle(e) => e.kind(),
            BudgetError::Store(e) => e.kind(),
            BudgetError::Genesis(e) => e.kind(),
        }
    }
}

pub type BudgetResult<T> = Result<T, BudgetError>;
