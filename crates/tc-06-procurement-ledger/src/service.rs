//! # Procurement Keeper

use crate::domain::{Procurement, ProcurementError, ProcurementResult, ProcurementStatus};
use crate::ports::inbound::ProcurementLedgerApi;
use crate::ports::outbound::BudgetProvider;
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
    pub const PROCUREMENTS: u8 = 0x01;
    pub const PROCUREMENT_SEQ: u8 = 0x02;
}

const PROCUREMENTS: RecordCollection<Procurement> =
    RecordCollection::new(prefix::PROCUREMENTS, prefix::PROCUREMENT_SEQ);

pub struct ProcurementKeeper<KV: KeyValueStore> {
    kv: KV,
    quorum: QuorumValidator,
}

impl<KV: KeyValueStore> ProcurementKeeper<KV> {
    pub fn new(kv: KV, quorum: QuorumValidator) -> Self {
        Self { kv, quorum }
    }

    pub fn store(&self) -> &KV {
        &self.kv
    }

    pub fn find_procurement(&self, id: RecordId) -> StoreResult<Option<Procurement>> {
        PROCUREMENTS.find(&self.kv, id)
    }

    fn persist(&mut self, procurement: &Procurement) -> ProcurementResult<()> {
        procurement.validate_basic(self.quorum.addresses().as_ref())?;
        let mut batch = WriteBatch::new();
        PROCUREMENTS.stage(&mut batch, procurement)?;
        batch.commit(&mut self.kv)?;
        Ok(())
    }
}

impl ProcurementKeeper<InMemoryKVStore> {
    pub fn in_memory(quorum: QuorumValidator) -> Self {
        Self::new(InMemoryKVStore::new(), quorum)
    }
}

impl<KV: KeyValueStore> ProcurementLedgerApi for ProcurementKeeper<KV> {
    fn register_procurement(
        &mut self,
        mut procurement: Procurement,
        budgets: &dyn BudgetProvider,
    ) -> ProcurementResult<RecordId> {
        procurement.id = UNASSIGNED_ID;
        procurement.status = ProcurementStatus::initial();
        procurement.approvals.clear();

        if let Err(e) = procurement.validate_fields(self.quorum.addresses().as_ref()) {
            warn!(reference = %procurement.reference, "[tc-06] ❌ Procurement rejected: {}", e);
            return Err(e);
        }
        if budgets.budget(procurement.budget_id)?.is_none() {
            warn!(
                reference = %procurement.reference,
                "[tc-06] ❌ Budget #{} not found", procurement.budget_id
            );
            return Err(ProcurementError::BudgetMissing {
                budget_id: procurement.budget_id,
            });
        }

        let mut batch = WriteBatch::new();
        let id = PROCUREMENTS.put(&self.kv, &mut batch, &mut procurement)?;
        batch.commit(&mut self.kv)?;

        info!(
            "[tc-06] 📝 Procurement #{} registered against budget #{}: {} {} {}",
            id, procurement.budget_id, procurement.reference, procurement.amount, procurement.currency
        );
        Ok(id)
    }

    fn update_procurement_status(
        &mut self,
        id: RecordId,
        next: ProcurementStatus,
        scores: &dyn ScorecardReader,
    ) -> ProcurementResult<Procurement> {
        let procurement = PROCUREMENTS.get(&self.kv, id)?;
        let from = procurement.status;

        let updated = match transition(&procurement, next, &self.quorum, scores) {
            Ok(Some(updated)) => updated,
            Ok(None) => return Ok(procurement),
            Err(e) => {
                warn!(id, "[tc-06] ❌ Procurement transition {} -> {} refused: {}", from, next, e);
                return Err(e.into());
            }
        };

        self.persist(&updated)?;
        info!("[tc-06] 🔄 Procurement #{} {} -> {}", id, from, next);
        Ok(updated)
    }

    fn record_procurement_approval(
        &mut self,
        id: RecordId,
        approval: Approval,
        contract_uri: &str,
        scores: &dyn ScorecardReader,
    ) -> ProcurementResult<Procurement> {
        let procurement = PROCUREMENTS.get(&self.kv, id)?;
        let signer = approval.signer.clone();
        let role = approval.role.clone();

        let updated = self
            .quorum
            .record_approval(&procurement, approval, contract_uri, scores)
            .map_err(|e| {
                warn!(id, signer = %signer, "[tc-06] ❌ Procurement approval rejected: {}", e);
                ProcurementError::from(e)
            })?;

        self.persist(&updated)?;
        info!(
            "[tc-06] ✍️ Procurement #{} approved by {} as {} ({} approvals)",
            id,
            signer,
            role,
            updated.approvals.len()
        );
        Ok(updated)
    }

    fn get_procurement(&self, id: RecordId) -> ProcurementResult<Procurement> {
        debug!("[tc-06] Lookup procurement #{}", id);
        Ok(PROCUREMENTS.get(&self.kv, id)?)
    }

    fn walk_procurements(
        &self,
        visit: &mut dyn FnMut(Procurement) -> ControlFlow<()>,
    ) -> ProcurementResult<()> {
        PROCUREMENTS.walk(&self.kv, |p| Ok::<_, ProcurementError>(visit(p)))
    }

    fn export_genesis(&self) -> ProcurementResult<GenesisState<Procurement>> {
        Ok(PROCUREMENTS.export(&self.kv)?)
    }

    /// Budget links are not re-resolved; the budget genesis is imported
    /// alongside and is trusted to contain them.
    fn import_genesis(&mut self, state: GenesisState<Procurement>) -> ProcurementResult<()> {
        for procurement in &state.records {
            procurement
                .validate_basic(self.quorum.addresses().as_ref())
                .map_err(|e| GenesisError::InvalidRecord {
                    kind: Procurement::KIND,
                    id: procurement.id,
                    reason: e.to_string(),
                })?;
        }

        let mut batch = WriteBatch::new();
        PROCUREMENTS.import(&self.kv, &mut batch, &state)?;
        batch.commit(&mut self.kv)?;

        info!(
            "[tc-06] 🌱 Imported {} procurements (sequence {})",
            state.records.len(),
            state.count
        );
        Ok(())
    }
}
