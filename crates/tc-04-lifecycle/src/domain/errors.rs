use shared_types::ErrorKind;
use tc_03_approval_quorum::ApprovalError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("invalid status transition {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// Quorum check for a gated target failed; passed through unchanged.
    #[error(transparent)]
    Quorum(#[from] ApprovalError),
}

impl LifecycleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LifecycleError::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            LifecycleError::Quorum(e) => e.kind(),
        }
    }
}

pub type LifecycleResult<T> = Result<T, LifecycleError>;
