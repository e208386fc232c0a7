use shared_types::{AddressError, ErrorKind};
use tc_01_record_store::{GenesisError, StoreError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DelegationError {
    #[error("invalid delegation: {reason}")]
    Validation { reason: String },

    #[error("invalid delegation {field} address: {source}")]
    InvalidAddress {
        field: &'static str,
        #[source]
        source: AddressError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Genesis(#[from] GenesisError),
}

impl DelegationError {
    pub fn validation(reason: impl Into<String>) -> Self {
        DelegationError::Validation {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DelegationError::Validation { .. } => ErrorKind::ValidationError,
            DelegationError::InvalidAddress { .. } => ErrorKind::InvalidAddress,
            DelegationError::Store(e) => e.kind(),
            DelegationError::Genesis(e) => e.kind(),
        }
    }
}

pub type DelegationResult<T> = Result<T, DelegationError>;
