//! # Scorecard Errors

use shared_types::{AddressError, ErrorKind};
use tc_01_record_store::{GenesisError, StoreError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScorecardError {
    /// Stateless field check failed.
    #[error("invalid scorecard: {reason}")]
    Validation { reason: String },

    /// An address field does not parse.
    #[error("invalid scorecard {field} address: {source}")]
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

impl ScorecardError {
    pub fn validation(reason: impl Into<String>) -> Self {
        ScorecardError::Validation {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ScorecardError::Validation { .. } => ErrorKind::ValidationError,
            ScorecardError::InvalidAddress { .. } => ErrorKind::InvalidAddress,
            ScorecardError::Store(e) => e.kind(),
            ScorecardError::Genesis(e) => e.kind(),
        }
    }
}

pub type ScorecardResult<T> = Result<T, ScorecardError>;
