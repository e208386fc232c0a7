//! # Transition Engine

use crate::domain::{LifecycleError, LifecycleRecord, LifecycleResult, LifecycleStatus};
use tc_03_approval_quorum::{ApprovalQuorumApi, ScorecardReader};
use tracing::{debug, warn};

/// Move `record` to `next`.
///
/// Returns `None` when `next` is already the current status, otherwise the
/// updated copy for the caller to persist. Gated targets run
/// `ensure_quorum` first and its error is returned as is.
pub fn transition<R, Q>(
    record: &R,
    next: R::Status,
    quorum: &Q,
    scores: &dyn ScorecardReader,
) -> LifecycleResult<Option<R>>
where
    R: LifecycleRecord,
    Q: ApprovalQuorumApi,
{
    let current = record.status();
    if current == next {
        debug!("[tc-04] Status already {}; nothing to do", next);
        return Ok(None);
    }

    if !current.can_transition_to(next) {
        warn!("[tc-04] ❌ Rejected transition {} -> {}", current, next);
        return Err(LifecycleError::InvalidTransition {
            from: current.to_string(),
            to: next.to_string(),
        });
    }

    if next.requires_quorum() {
        quorum.ensure_quorum(record, scores)?;
    }

    let mut updated = record.clone();
    updated.set_status(next);
    Ok(Some(updated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::test_utils::derive_address;
    use shared_types::{ErrorKind, HexAddressCodec};
    use std::fmt;
    use std::sync::Arc;
    use tc_02_accountability_scores::Scorecard;
    use tc_03_approval_quorum::{
        Approvable, Approval, InMemoryScorecards, QuorumConfig, QuorumValidator,
    };

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Stage {
        Open,
        Review,
        Closed,
    }

    impl fmt::Display for Stage {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{:?}", self)
        }
    }

    impl LifecycleStatus for Stage {
        fn initial() -> Self {
            Stage::Open
        }
        fn allowed_transitions(&self) -> &'static [Self] {
            match self {
                Stage::Open => &[Stage::Review],
                Stage::Review => &[Stage::Closed, Stage::Open],
                Stage::Closed => &[],
            }
        }
        fn requires_quorum(&self) -> bool {
            matches!(self, Stage::Closed)
        }
    }

    #[derive(Debug, Clone)]
    struct Ticket {
        stage: Stage,
        contract: String,
        approvals: Vec<Approval>,
    }

    impl Approvable for Ticket {
        fn liability_contract_uri(&self) -> &str {
            &self.contract
        }
        fn set_liability_contract_uri(&mut self, uri: String) {
            self.contract = uri;
        }
        fn approvals(&self) -> &[Approval] {
            &self.approvals
        }
        fn approvals_mut(&mut self) -> &mut Vec<Approval> {
            &mut self.approvals
        }
    }

    impl LifecycleRecord for Ticket {
        type Status = Stage;
        fn status(&self) -> Stage {
            self.stage
        }
        fn set_status(&mut self, status: Stage) {
            self.stage = status;
        }
    }

    fn ticket(stage: Stage) -> Ticket {
        Ticket {
            stage,
            contract: String::new(),
            approvals: Vec::new(),
        }
    }

    fn validator() -> QuorumValidator {
        QuorumValidator::new(QuorumConfig::default(), Arc::new(HexAddressCodec::default()))
    }

    #[test]
    fn test_same_status_is_noop() {
        let scores = InMemoryScorecards::new();
        let out = transition(&ticket(Stage::Review), Stage::Review, &validator(), &scores).unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn test_adjacent_ungated_transition() {
        let scores = InMemoryScorecards::new();
        let out = transition(&ticket(Stage::Open), Stage::Review, &validator(), &scores)
            .unwrap()
            .unwrap();
        assert_eq!(out.stage, Stage::Review);
    }

    #[test]
    fn test_non_adjacent_and_terminal_rejected() {
        let scores = InMemoryScorecards::new();
        let err = transition(&ticket(Stage::Open), Stage::Closed, &validator(), &scores)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTransition);
        assert_eq!(err.to_string(), "invalid status transition Open -> Closed");

        let err = transition(&ticket(Stage::Closed), Stage::Open, &validator(), &scores)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTransition);
    }

    #[test]
    fn test_gated_transition_propagates_quorum_error() {
        let mut scores = InMemoryScorecards::new();
        let quorum = validator();

        let mut t = ticket(Stage::Review);
        let err = transition(&t, Stage::Closed, &quorum, &scores).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LiabilityContractMissing);

        for (seed, role) in [("a", "Audit"), ("b", "Controller")] {
            let card = scores.insert(Scorecard::new(derive_address(seed), "accountability", 90));
            let approval = Approval::new(derive_address(seed), role, card, "ipfs://sig");
            t = quorum
                .record_approval(&t, approval, "ipfs://contract", &scores)
                .unwrap();
            if role == "Audit" {
                let err = transition(&t, Stage::Closed, &quorum, &scores).unwrap_err();
                assert_eq!(err.kind(), ErrorKind::ApprovalThreshold);
            }
        }

        let closed = transition(&t, Stage::Closed, &quorum, &scores).unwrap().unwrap();
        assert_eq!(closed.stage, Stage::Closed);
        assert!(closed.stage.is_terminal());
    }
}
