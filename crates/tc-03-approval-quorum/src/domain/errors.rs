//! # Approval Errors

use shared_types::{AddressError, ErrorKind, RecordId};
use tc_01_record_store::StoreError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApprovalError {
    /// No liability contract URI on the record and none supplied.
    #[error("liability contract required")]
    LiabilityContractMissing,

    /// Approval payload failed its stateless checks.
    #[error("invalid approval: {reason}")]
    InvalidApproval { reason: String },

    #[error("invalid approval signer {signer}: {source}")]
    InvalidSigner {
        signer: String,
        #[source]
        source: AddressError,
    },

    #[error("duplicate approval role {role} or signer {signer}")]
    DuplicateApproval { role: String, signer: String },

    #[error("insufficient approvals: {actual} of {required} required")]
    ApprovalThreshold { required: usize, actual: usize },

    #[error("scorecard #{scorecard_id} backing approval not found")]
    ScoreLookupFailed { scorecard_id: RecordId },

    #[error("scorecard #{scorecard_id} subject {subject} does not match signer {signer}")]
    ScoreMismatch {
        scorecard_id: RecordId,
        subject: String,
        signer: String,
    },

    #[error("scorecard #{scorecard_id} score {score} below threshold {min_score}")]
    ScoreBelowThreshold {
        scorecard_id: RecordId,
        score: u32,
        min_score: u32,
    },

    /// Scorecard storage failed while resolving a backing score.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApprovalError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        ApprovalError::InvalidApproval {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApprovalError::LiabilityContractMissing => ErrorKind::LiabilityContractMissing,
            ApprovalError::InvalidApproval { .. } => ErrorKind::ValidationError,
            ApprovalError::InvalidSigner { .. } => ErrorKind::InvalidAddress,
            ApprovalError::DuplicateApproval { .. } => ErrorKind::DuplicateApproval,
            ApprovalError::ApprovalThreshold { .. } => ErrorKind::ApprovalThreshold,
            ApprovalError::ScoreLookupFailed { .. } => ErrorKind::ApprovalScoreLookupFailed,
            ApprovalError::ScoreMismatch { .. } => ErrorKind::ApprovalScoreMismatch,
            ApprovalError::ScoreBelowThreshold { .. } => ErrorKind::ApprovalScoreBelowThreshold,
            ApprovalError::Store(e) => e.kind(),
        }
    }
}

pub type ApprovalResult<T> = Result<T, ApprovalError>;
