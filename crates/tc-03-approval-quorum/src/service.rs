//! # Quorum Validator
//!
//! Admits approvals onto records and decides whether a record has quorum.
//! Works on copies; the owning keeper persists the result.

use crate::domain::{Approvable, Approval, ApprovalError, ApprovalResult, QuorumConfig};
use crate::ports::inbound::ApprovalQuorumApi;
use crate::ports::outbound::ScorecardReader;
use shared_types::{is_blank, AddressValidator, NormalizedKey};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct QuorumValidator {
    config: QuorumConfig,
    addresses: Arc<dyn AddressValidator>,
}

impl QuorumValidator {
    pub fn new(config: QuorumConfig, addresses: Arc<dyn AddressValidator>) -> Self {
        Self { config, addresses }
    }

    pub fn config(&self) -> &QuorumConfig {
        &self.config
    }

    pub fn addresses(&self) -> &Arc<dyn AddressValidator> {
        &self.addresses
    }

    /// Resolve the approval's scorecard and check subject and score.
    fn check_backing(
        &self,
        approval: &Approval,
        scores: &dyn ScorecardReader,
    ) -> ApprovalResult<()> {
        let card = scores
            .scorecard(approval.scorecard_id)?
            .ok_or(ApprovalError::ScoreLookupFailed {
                scorecard_id: approval.scorecard_id,
            })?;

        if NormalizedKey::new(&card.subject) != approval.signer_key() {
            return Err(ApprovalError::ScoreMismatch {
                scorecard_id: card.id,
                subject: card.subject,
                signer: approval.signer.clone(),
            });
        }
        if card.score < self.config.min_score {
            return Err(ApprovalError::ScoreBelowThreshold {
                scorecard_id: card.id,
                score: card.score,
                min_score: self.config.min_score,
            });
        }
        debug!(
            "[tc-03] Approval by {} backed by scorecard #{} ({})",
            approval.signer, card.id, card.score
        );
        Ok(())
    }
}

impl ApprovalQuorumApi for QuorumValidator {
    fn record_approval<R: Approvable>(
        &self,
        record: &R,
        approval: Approval,
        contract_uri: &str,
        scores: &dyn ScorecardReader,
    ) -> ApprovalResult<R> {
        let mut updated = record.clone();

        if !is_blank(contract_uri) {
            updated.set_liability_contract_uri(contract_uri.to_string());
        }
        if is_blank(updated.liability_contract_uri()) {
            return Err(ApprovalError::LiabilityContractMissing);
        }

        let retained: Vec<Approval> = updated
            .approvals()
            .iter()
            .filter(|existing| !existing.conflicts_with(&approval))
            .cloned()
            .collect();

        approval.validate(self.addresses.as_ref())?;

        if retained.iter().any(|existing| existing.conflicts_with(&approval)) {
            return Err(ApprovalError::DuplicateApproval {
                role: approval.role,
                signer: approval.signer,
            });
        }

        if let Err(e) = self.check_backing(&approval, scores) {
            warn!(signer = %approval.signer, role = %approval.role, "[tc-03] ❌ Approval rejected: {}", e);
            return Err(e);
        }

        let replaced = updated.approvals().len() - retained.len();
        if replaced > 0 {
            debug!(
                "[tc-03] Approval by {} as {} replaces {} earlier approval(s)",
                approval.signer, approval.role, replaced
            );
        }

        let approvals = updated.approvals_mut();
        *approvals = retained;
        approvals.push(approval);
        Ok(updated)
    }

    fn ensure_quorum<R: Approvable>(
        &self,
        record: &R,
        scores: &dyn ScorecardReader,
    ) -> ApprovalResult<()> {
        if is_blank(record.liability_contract_uri()) {
            return Err(ApprovalError::LiabilityContractMissing);
        }
        let actual = record.approvals().len();
        if actual < self.config.min_approvals {
            return Err(ApprovalError::ApprovalThreshold {
                required: self.config.min_approvals,
                actual,
            });
        }
        for approval in record.approvals() {
            self.check_backing(approval, scores)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryScorecards;
    use shared_types::test_utils::derive_address;
    use shared_types::{ErrorKind, HexAddressCodec, RecordId};
    use tc_02_accountability_scores::Scorecard;

    #[derive(Debug, Clone, Default)]
    struct Doc {
        contract: String,
        approvals: Vec<Approval>,
    }

    impl Approvable for Doc {
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

    const CONTRACT: &str = "ipfs://liability/budget-2025";

    struct Fixture {
        validator: QuorumValidator,
        scores: InMemoryScorecards,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                validator: QuorumValidator::new(
                    QuorumConfig::default(),
                    Arc::new(HexAddressCodec::default()),
                ),
                scores: InMemoryScorecards::new(),
            }
        }

        fn score(&mut self, seed: &str, score: u32) -> RecordId {
            self.scores
                .insert(Scorecard::new(derive_address(seed), "accountability", score))
        }

        fn approve(&self, doc: &Doc, seed: &str, role: &str, card: RecordId) -> ApprovalResult<Doc> {
            let approval = Approval::new(derive_address(seed), role, card, "ipfs://sig");
            self.validator
                .record_approval(doc, approval, CONTRACT, &self.scores)
        }
    }

    #[test]
    fn test_record_approval_sets_contract_and_appends() {
        let mut fx = Fixture::new();
        let card = fx.score("auditor", 94);

        let doc = fx.approve(&Doc::default(), "auditor", "Audit", card).unwrap();
        assert_eq!(doc.contract, CONTRACT);
        assert_eq!(doc.approvals.len(), 1);
    }

    #[test]
    fn test_missing_contract_rejected() {
        let mut fx = Fixture::new();
        let card = fx.score("auditor", 94);
        let approval = Approval::new(derive_address("auditor"), "Audit", card, "ipfs://sig");
        let err = fx
            .validator
            .record_approval(&Doc::default(), approval, "  ", &fx.scores)
            .unwrap_err();
        assert_eq!(err, ApprovalError::LiabilityContractMissing);
    }

    #[test]
    fn test_same_role_replaces_earlier_approval() {
        let mut fx = Fixture::new();
        let a = fx.score("auditor-a", 94);
        let b = fx.score("auditor-b", 91);

        let doc = fx.approve(&Doc::default(), "auditor-a", "Audit", a).unwrap();
        let doc = fx.approve(&doc, "auditor-b", " audit ", b).unwrap();

        assert_eq!(doc.approvals.len(), 1);
        assert_eq!(doc.approvals[0].signer, derive_address("auditor-b"));
    }

    #[test]
    fn test_same_signer_replaces_earlier_role() {
        let mut fx = Fixture::new();
        let card = fx.score("auditor", 94);

        let doc = fx.approve(&Doc::default(), "auditor", "Audit", card).unwrap();
        let doc = fx.approve(&doc, "auditor", "Controller", card).unwrap();

        assert_eq!(doc.approvals.len(), 1);
        assert_eq!(doc.approvals[0].role, "Controller");
    }

    #[test]
    fn test_replacement_dropping_two_entries() {
        let mut fx = Fixture::new();
        let a = fx.score("a", 94);
        let b = fx.score("b", 91);

        let doc = fx.approve(&Doc::default(), "a", "Audit", a).unwrap();
        let doc = fx.approve(&doc, "b", "Controller", b).unwrap();
        // signer a taking role Controller conflicts with both entries
        let doc = fx.approve(&doc, "a", "Controller", a).unwrap();

        assert_eq!(doc.approvals.len(), 1);
        assert_eq!(doc.approvals[0].signer, derive_address("a"));
    }

    #[test]
    fn test_invalid_signer_address() {
        let mut fx = Fixture::new();
        let card = fx.score("auditor", 94);
        let approval = Approval::new("treasurer", "Audit", card, "ipfs://sig");
        let err = fx
            .validator
            .record_approval(&Doc::default(), approval, CONTRACT, &fx.scores)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidAddress);
    }

    #[test]
    fn test_score_lookup_mismatch_and_threshold() {
        let mut fx = Fixture::new();
        let low = fx.score("weak", 79);
        let other = fx.score("someone-else", 95);

        let err = fx.approve(&Doc::default(), "auditor", "Audit", 99).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ApprovalScoreLookupFailed);

        let err = fx.approve(&Doc::default(), "auditor", "Audit", other).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ApprovalScoreMismatch);

        let err = fx.approve(&Doc::default(), "weak", "Audit", low).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ApprovalScoreBelowThreshold);
    }

    #[test]
    fn test_rejected_approval_leaves_input_untouched() {
        let mut fx = Fixture::new();
        let a = fx.score("a", 94);
        let doc = fx.approve(&Doc::default(), "a", "Audit", a).unwrap();

        let other = fx.score("other", 95);
        assert!(fx.approve(&doc, "b", "Audit", other).is_err());
        assert_eq!(doc.approvals.len(), 1);
        assert_eq!(doc.approvals[0].signer, derive_address("a"));
    }

    #[test]
    fn test_ensure_quorum() {
        let mut fx = Fixture::new();
        let a = fx.score("a", 94);
        let b = fx.score("b", 91);

        let doc = fx.approve(&Doc::default(), "a", "Audit", a).unwrap();
        let err = fx.validator.ensure_quorum(&doc, &fx.scores).unwrap_err();
        assert_eq!(
            err,
            ApprovalError::ApprovalThreshold {
                required: 2,
                actual: 1
            }
        );

        let doc = fx.approve(&doc, "b", "Controller", b).unwrap();
        fx.validator.ensure_quorum(&doc, &fx.scores).unwrap();

        // scores are re-checked, not cached
        fx.scores
            .insert(Scorecard {
                id: b,
                ..Scorecard::new(derive_address("b"), "accountability", 60)
            });
        let err = fx.validator.ensure_quorum(&doc, &fx.scores).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ApprovalScoreBelowThreshold);

        fx.scores.remove(b);
        let err = fx.validator.ensure_quorum(&doc, &fx.scores).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ApprovalScoreLookupFailed);
    }

    #[test]
    fn test_ensure_quorum_requires_contract() {
        let fx = Fixture::new();
        let err = fx
            .validator
            .ensure_quorum(&Doc::default(), &fx.scores)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LiabilityContractMissing);
    }

    #[test]
    fn test_custom_thresholds() {
        let mut fx = Fixture::new();
        fx.validator = QuorumValidator::new(
            QuorumConfig::default().with_min_approvals(1).with_min_score(95),
            Arc::new(HexAddressCodec::default()),
        );
        let a = fx.score("a", 94);
        assert!(fx.approve(&Doc::default(), "a", "Audit", a).is_err());

        let b = fx.score("b", 96);
        let doc = fx.approve(&Doc::default(), "b", "Audit", b).unwrap();
        fx.validator.ensure_quorum(&doc, &fx.scores).unwrap();
    }
}
