//! # Budget Keeper

use crate::domain::{Budget, BudgetError, BudgetResult, BudgetStatus};
use crate::ports::inbound::BudgetRegistryApi;
use shared_types::{RecordId, UNASSIGNED_ID};
use std::ops::ControlFlow;
use tc_01_record_store::{
    GenesisError, GenesisState, InMemoryKVStore, KeyValueStore, Record, RecordCollection,
    StoreResult, WriteBatch,
};
use tc_03_approval_quorum::{Approval, ApprovalQuorumApi, QuorumValidator, ScorecardReader};
use tc_04_lifecycle::{transition, LifecycleStatus};
use tracing::{debug, info, warn};

/// Key prefixes inside the keeper's store.
pub mod prefix {
    pub const BUDGETS: u8 = 0x01;
    pub const BUDGET_SEQ: u8 = 0x02;
}

const BUDGETS: RecordCollection<Budget> =
    RecordCollection::new(prefix::BUDGETS, prefix::BUDGET_SEQ);

pub struct BudgetKeeper<KV: KeyValueStore> {
    kv: KV,
    quorum: QuorumValidator,
}

impl<KV: KeyValueStore> BudgetKeeper<KV> {
    pub fn new(kv: KV, quorum: QuorumValidator) -> Self {
        Self { kv, quorum }
    }

    pub fn store(&self) -> &KV {
        &self.kv
    }

    /// `get_budget` without the not-found error, for collaborator readers.
    pub fn find_budget(&self, id: RecordId) -> StoreResult<Option<Budget>> {
        BUDGETS.find(&self.kv, id)
    }

    /// Validate and write an already-identified budget in one batch.
    fn persist(&mut self, budget: &Budget) -> BudgetResult<()> {
        budget.validate_basic(self.quorum.addresses().as_ref())?;
        let mut batch = WriteBatch::new();
        BUDGETS.stage(&mut batch, budget)?;
        batch.commit(&mut self.kv)?;
        Ok(())
    }
}

impl BudgetKeeper<InMemoryKVStore> {
    pub fn in_memory(quorum: QuorumValidator) -> Self {
        Self::new(InMemoryKVStore::new(), quorum)
    }
}

impl<KV: KeyValueStore> BudgetRegistryApi for BudgetKeeper<KV> {
    fn register_budget(&mut self, mut budget: Budget) -> BudgetResult<RecordId> {
        budget.id = UNASSIGNED_ID;
        budget.status = BudgetStatus::initial();
        budget.approvals.clear();

        if let Err(e) = budget.validate_fields(self.quorum.addresses().as_ref()) {
            warn!(agency = %budget.agency, "[tc-05] ❌ Budget rejected: {}", e);
            return Err(e);
        }

        let mut batch = WriteBatch::new();
        let id = BUDGETS.put(&self.kv, &mut batch, &mut budget)?;
        batch.commit(&mut self.kv)?;

        info!(
            "[tc-05] 📝 Budget #{} registered: {} {} {} {}",
            id, budget.agency, budget.fiscal_year, budget.amount, budget.currency
        );
        Ok(id)
    }

    fn update_budget_status(
        &mut self,
        id: RecordId,
        next: BudgetStatus,
        scores: &dyn ScorecardReader,
    ) -> BudgetResult<Budget> {
        let budget = BUDGETS.get(&self.kv, id)?;
        let from = budget.status;

        let updated = match transition(&budget, next, &self.quorum, scores) {
            Ok(Some(updated)) => updated,
            Ok(None) => return Ok(budget),
            Err(e) => {
                warn!(id, "[tc-05] ❌ Budget transition {} -> {} refused: {}", from, next, e);
                return Err(e.into());
            }
        };

        self.persist(&updated)?;
        info!("[tc-05] 🔄 Budget #{} {} -> {}", id, from, next);
        Ok(updated)
    }

    fn record_budget_approval(
        &mut self,
        id: RecordId,
        approval: Approval,
        contract_uri: &str,
        scores: &dyn ScorecardReader,
    ) -> BudgetResult<Budget> {
        let budget = BUDGETS.get(&self.kv, id)?;
        let signer = approval.signer.clone();
        let role = approval.role.clone();

        let updated = self
            .quorum
            .record_approval(&budget, approval, contract_uri, scores)
            .map_err(|e| {
                warn!(id, signer = %signer, "[tc-05] ❌ Budget approval rejected: {}", e);
                BudgetError::from(e)
            })?;

        self.persist(&updated)?;
        info!(
            "[tc-05] ✍️ Budget #{} approved by {} as {} ({} approvals)",
            id,
            signer,
            role,
            updated.approvals.len()
        );
        Ok(updated)
    }

    fn get_budget(&self, id: RecordId) -> BudgetResult<Budget> {
        debug!("[tc-05] Lookup budget #{}", id);
        Ok(BUDGETS.get(&self.kv, id)?)
    }

    fn has_budget(&self, id: RecordId) -> BudgetResult<bool> {
        Ok(BUDGETS.exists(&self.kv, id)?)
    }

    fn walk_budgets(
        &self,
        visit: &mut dyn FnMut(Budget) -> ControlFlow<()>,
    ) -> BudgetResult<()> {
        BUDGETS.walk(&self.kv, |budget| Ok::<_, BudgetError>(visit(budget)))
    }

    fn export_genesis(&self) -> BudgetResult<GenesisState<Budget>> {
        Ok(BUDGETS.export(&self.kv)?)
    }

    fn import_genesis(&mut self, state: GenesisState<Budget>) -> BudgetResult<()> {
        for budget in &state.records {
            budget
                .validate_basic(self.quorum.addresses().as_ref())
                .map_err(|e| GenesisError::InvalidRecord {
                    kind: Budget::KIND,
                    id: budget.id,
                    reason: e.to_string(),
                })?;
        }

        let mut batch = WriteBatch::new();
        BUDGETS.import(&self.kv, &mut batch, &state)?;
        batch.commit(&mut self.kv)?;

        info!(
            "[tc-05] 🌱 Imported {} budgets (sequence {})",
            state.records.len(),
            state.count
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::test_utils::derive_address;
    use shared_types::{Amount, ErrorKind, HexAddressCodec};
    use std::sync::Arc;
    use tc_02_accountability_scores::Scorecard;
    use tc_03_approval_quorum::{InMemoryScorecards, QuorumConfig};

    const CONTRACT: &str = "ipfs://liability/budget-2025";

    fn keeper() -> BudgetKeeper<InMemoryKVStore> {
        BudgetKeeper::in_memory(QuorumValidator::new(
            QuorumConfig::default(),
            Arc::new(HexAddressCodec::default()),
        ))
    }

    fn budget() -> Budget {
        Budget::new(
            "Department of Finance",
            "2025",
            "National infrastructure",
            Amount::from(50_000_000u64),
            "php",
            derive_address("budget-officer"),
        )
    }

    fn scores() -> InMemoryScorecards {
        let mut scores = InMemoryScorecards::new();
        scores.insert(Scorecard::new(derive_address("auditor"), "accountability", 94));
        scores.insert(Scorecard::new(derive_address("controller"), "accountability", 91));
        scores
    }

    fn approve(keeper: &mut BudgetKeeper<InMemoryKVStore>, id: RecordId, scores: &InMemoryScorecards) {
        keeper
            .record_budget_approval(
                id,
                Approval::new(derive_address("auditor"), "Audit", 1, "ipfs://sig/a"),
                CONTRACT,
                scores,
            )
            .unwrap();
        keeper
            .record_budget_approval(
                id,
                Approval::new(derive_address("controller"), "Controller", 2, "ipfs://sig/c"),
                "",
                scores,
            )
            .unwrap();
    }

    #[test]
    fn test_register_forces_draft_and_fresh_id() {
        let mut keeper = keeper();
        let mut input = budget();
        input.id = 77;
        input.status = BudgetStatus::Completed;
        input.approvals.push(Approval::new("x", "y", 1, "z"));

        let id = keeper.register_budget(input).unwrap();
        assert_eq!(id, 1);

        let stored = keeper.get_budget(id).unwrap();
        assert_eq!(stored.status, BudgetStatus::Draft);
        assert!(stored.approvals.is_empty());
        assert!(keeper.has_budget(1).unwrap());
        assert!(!keeper.has_budget(2).unwrap());
    }

    #[test]
    fn test_register_invalid_leaves_sequence_untouched() {
        let mut keeper = keeper();
        let mut bad = budget();
        bad.currency = String::new();
        assert!(keeper.register_budget(bad).is_err());
        assert_eq!(keeper.register_budget(budget()).unwrap(), 1);
    }

    #[test]
    fn test_legislate_after_quorum_then_no_return_to_draft() {
        let mut keeper = keeper();
        let scores = scores();
        let id = keeper.register_budget(budget()).unwrap();

        approve(&mut keeper, id, &scores);
        let legislated = keeper
            .update_budget_status(id, BudgetStatus::Legislated, &scores)
            .unwrap();
        assert_eq!(legislated.status, BudgetStatus::Legislated);
        assert_eq!(legislated.liability_contract_uri, CONTRACT);

        let err = keeper
            .update_budget_status(id, BudgetStatus::Draft, &scores)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTransition);
        assert_eq!(keeper.get_budget(id).unwrap().status, BudgetStatus::Legislated);
    }

    #[test]
    fn test_gated_transition_without_quorum_is_refused() {
        let mut keeper = keeper();
        let scores = scores();
        let id = keeper.register_budget(budget()).unwrap();

        let err = keeper
            .update_budget_status(id, BudgetStatus::Legislated, &scores)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LiabilityContractMissing);
        assert_eq!(keeper.get_budget(id).unwrap().status, BudgetStatus::Draft);
    }

    #[test]
    fn test_same_status_is_noop() {
        let mut keeper = keeper();
        let id = keeper.register_budget(budget()).unwrap();
        let unchanged = keeper
            .update_budget_status(id, BudgetStatus::Draft, &InMemoryScorecards::new())
            .unwrap();
        assert_eq!(unchanged, keeper.get_budget(id).unwrap());
    }

    #[test]
    fn test_operations_on_missing_budget() {
        let mut keeper = keeper();
        let scores = scores();
        assert_eq!(keeper.get_budget(9).unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(
            keeper
                .update_budget_status(9, BudgetStatus::Legislated, &scores)
                .unwrap_err()
                .kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_walk_and_genesis_round_trip() {
        let mut keeper = keeper();
        let scores = scores();
        for _ in 0..3 {
            keeper.register_budget(budget()).unwrap();
        }
        approve(&mut keeper, 2, &scores);

        let mut ids = Vec::new();
        keeper
            .walk_budgets(&mut |b| {
                ids.push(b.id);
                ControlFlow::Continue(())
            })
            .unwrap();
        assert_eq!(ids, vec![1, 2, 3]);

        let exported = keeper.export_genesis().unwrap();
        let mut restored = self::keeper();
        restored.import_genesis(exported.clone()).unwrap();
        assert_eq!(restored.export_genesis().unwrap(), exported);
        assert_eq!(restored.register_budget(budget()).unwrap(), 4);
    }

    #[test]
    fn test_genesis_rejects_duplicates_and_bad_records() {
        let mut one = budget();
        one.id = 1;

        let err = keeper()
            .import_genesis(GenesisState {
                records: vec![one.clone(), one.clone()],
                count: 1,
            })
            .unwrap_err();
        assert!(matches!(
            err,
            BudgetError::Genesis(GenesisError::DuplicateId { id: 1, .. })
        ));

        let mut legislated = one;
        legislated.status = BudgetStatus::Legislated;
        let err = keeper()
            .import_genesis(GenesisState {
                records: vec![legislated],
                count: 1,
            })
            .unwrap_err();
        assert!(matches!(
            err,
            BudgetError::Genesis(GenesisError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn test_genesis_rejects_one_signer_under_two_roles() {
        let auditor = derive_address("auditor");
        let mut legislated = budget();
        legislated.id = 1;
        legislated.status = BudgetStatus::Legislated;
        legislated.liability_contract_uri = CONTRACT.into();
        legislated.approvals = vec![
            Approval::new(auditor.clone(), "Audit", 1, "ipfs://sig/a"),
            Approval::new(format!("0x{}", auditor[2..].to_uppercase()), " audit ", 1, "ipfs://sig/b"),
        ];

        let mut keeper = keeper();
        let err = keeper
            .import_genesis(GenesisState {
                records: vec![legislated],
                count: 1,
            })
            .unwrap_err();
        match err {
            BudgetError::Genesis(GenesisError::InvalidRecord { id, reason, .. }) => {
                assert_eq!(id, 1);
                assert!(reason.contains("duplicate approval"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!keeper.has_budget(1).unwrap());
    }
}
