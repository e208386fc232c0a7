//! # Inbound Ports (Driving Ports)

use crate::domain::{Approvable, Approval, ApprovalResult};
use crate::ports::outbound::ScorecardReader;

pub trait ApprovalQuorumApi {
    /// Admit `approval` onto a copy of `record` and return the copy.
    ///
    /// A non-empty `contract_uri` replaces the record's liability contract.
    /// Existing approvals sharing the incoming role or signer are replaced.
    ///
    /// ## Errors
    ///
    /// - `LiabilityContractMissing`: no contract on the record or in the call
    /// - `InvalidApproval` / `InvalidSigner`: malformed payload
    /// - `DuplicateApproval`: conflict survived replacement
    /// - `ScoreLookupFailed` / `ScoreMismatch` / `ScoreBelowThreshold`
    fn record_approval<R: Approvable>(
        &self,
        record: &R,
        approval: Approval,
        contract_uri: &str,
        scores: &dyn ScorecardReader,
    ) -> ApprovalResult<R>;

    /// Fail unless `record` carries a contract and enough trusted approvals.
    ///
    /// Every stored approval's scorecard is re-resolved and re-checked.
    fn ensure_quorum<R: Approvable>(
        &self,
        record: &R,
        scores: &dyn ScorecardReader,
    ) -> ApprovalResult<()>;
}
