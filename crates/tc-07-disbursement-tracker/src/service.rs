//! # Disbursement Keeper
//!
//! Besides the records, keeps `procurement id → running total`. The total
//! and the new disbursement are written in the same batch.

use crate::domain::{
    sum_by_procurement, DisbursedTotal, Disbursement, DisbursementError, DisbursementGenesis,
    DisbursementResult, DisbursementStatus,
};
use crate::ports::inbound::DisbursementTrackerApi;
use crate::ports::outbound::ProcurementProvider;
use shared_types::{Amount, RecordId, UNASSIGNED_ID};
use std::ops::ControlFlow;
use tc_01_record_store::{
    GenesisError, GenesisState, InMemoryKVStore, KeyValueStore, Record, RecordCollection,
    StoreResult, ValueMap, WriteBatch,
};
use tc_03_approval_quorum::{Approval, ApprovalQuorumApi, QuorumValidator, ScorecardReader};
use tc_04_lifecycle::{transition, LifecycleStatus};
use tracing::{debug, error, info, warn};

/// Key prefixes inside the keeper's store.
pub mod prefix {
    pub const DISBURSEMENTS: u8 = 0x01;
    pub const DISBURSEMENT_SEQ: u8 = 0x02;
    pub const DISBURSED_TOTALS: u8 = 0x03;
}

const DISBURSEMENTS: RecordCollection<Disbursement> =
    RecordCollection::new(prefix::DISBURSEMENTS, prefix::DISBURSEMENT_SEQ);

const TOTALS: ValueMap<Amount> = ValueMap::new("disbursed total", prefix::DISBURSED_TOTALS);

pub struct DisbursementKeeper<KV: KeyValueStore> {
    kv: KV,
    quorum: QuorumValidator,
}

impl<KV: KeyValueStore> DisbursementKeeper<KV> {
    pub fn new(kv: KV, quorum: QuorumValidator) -> Self {
        Self { kv, quorum }
    }

    pub fn store(&self) -> &KV {
        &self.kv
    }

    fn total(&self, procurement_id: RecordId) -> StoreResult<Amount> {
        Ok(TOTALS.get(&self.kv, procurement_id)?.unwrap_or_default())
    }

    fn persist(&mut self, disbursement: &Disbursement) -> DisbursementResult<()> {
        disbursement.validate_basic(self.quorum.addresses().as_ref())?;
        let mut batch = WriteBatch::new();
        DISBURSEMENTS.stage(&mut batch, disbursement)?;
        batch.commit(&mut self.kv)?;
        Ok(())
    }
}

impl DisbursementKeeper<InMemoryKVStore> {
    pub fn in_memory(quorum: QuorumValidator) -> Self {
        Self::new(InMemoryKVStore::new(), quorum)
    }
}

impl<KV: KeyValueStore> DisbursementTrackerApi for DisbursementKeeper<KV> {
    fn register_disbursement(
        &mut self,
        mut disbursement: Disbursement,
        procurements: &dyn ProcurementProvider,
    ) -> DisbursementResult<RecordId> {
        disbursement.id = UNASSIGNED_ID;
        disbursement.status = DisbursementStatus::initial();
        disbursement.approvals.clear();

        if let Err(e) = disbursement.validate_fields(self.quorum.addresses().as_ref()) {
            warn!(
                procurement_id = disbursement.procurement_id,
                "[tc-07] ❌ Disbursement rejected: {}", e
            );
            return Err(e);
        }

        let procurement_id = disbursement.procurement_id;
        let procurement = procurements.procurement(procurement_id)?.ok_or_else(|| {
            warn!("[tc-07] ❌ Procurement #{} not found", procurement_id);
            DisbursementError::ProcurementMissing { procurement_id }
        })?;

        let disbursed = self.total(procurement_id)?;
        let new_total = disbursed
            .checked_add(disbursement.amount)
            .filter(|total| *total <= procurement.amount)
            .ok_or_else(|| {
                warn!(
                    procurement_id,
                    "[tc-07] ❌ Disbursement of {} would exceed cap {} (disbursed {})",
                    disbursement.amount,
                    procurement.amount,
                    disbursed
                );
                DisbursementError::AmountExceeded {
                    procurement_id,
                    requested: disbursement.amount,
                    disbursed,
                    cap: procurement.amount,
                }
            })?;

        let mut batch = WriteBatch::new();
        let id = DISBURSEMENTS.put(&self.kv, &mut batch, &mut disbursement)?;
        TOTALS.stage(&mut batch, procurement_id, &new_total)?;
        batch.commit(&mut self.kv)?;

        info!(
            "[tc-07] 💸 Disbursement #{} of {} {} against procurement #{} (total {} of {})",
            id,
            disbursement.amount,
            disbursement.currency,
            procurement_id,
            new_total,
            procurement.amount
        );
        Ok(id)
    }

    fn update_disbursement_status(
        &mut self,
        id: RecordId,
        next: DisbursementStatus,
        scores: &dyn ScorecardReader,
    ) -> DisbursementResult<Disbursement> {
        let disbursement = DISBURSEMENTS.get(&self.kv, id)?;
        let from = disbursement.status;

        let updated = match transition(&disbursement, next, &self.quorum, scores) {
            Ok(Some(updated)) => updated,
            Ok(None) => return Ok(disbursement),
            Err(e) => {
                warn!(id, "[tc-07] ❌ Disbursement transition {} -> {} refused: {}", from, next, e);
                return Err(e.into());
            }
        };

        self.persist(&updated)?;
        info!("[tc-07] 🔄 Disbursement #{} {} -> {}", id, from, next);
        Ok(updated)
    }

    fn record_disbursement_approval(
        &mut self,
        id: RecordId,
        approval: Approval,
        contract_uri: &str,
        scores: &dyn ScorecardReader,
    ) -> DisbursementResult<Disbursement> {
        let disbursement = DISBURSEMENTS.get(&self.kv, id)?;
        let signer = approval.signer.clone();
        let role = approval.role.clone();

        let updated = self
            .quorum
            .record_approval(&disbursement, approval, contract_uri, scores)
            .map_err(|e| {
                warn!(id, signer = %signer, "[tc-07] ❌ Disbursement approval rejected: {}", e);
                DisbursementError::from(e)
            })?;

        self.persist(&updated)?;
        info!(
            "[tc-07] ✍️ Disbursement #{} approved by {} as {} ({} approvals)",
            id,
            signer,
            role,
            updated.approvals.len()
        );
        Ok(updated)
    }

    fn get_disbursement(&self, id: RecordId) -> DisbursementResult<Disbursement> {
        debug!("[tc-07] Lookup disbursement #{}", id);
        Ok(DISBURSEMENTS.get(&self.kv, id)?)
    }

    fn walk_disbursements(
        &self,
        visit: &mut dyn FnMut(Disbursement) -> ControlFlow<()>,
    ) -> DisbursementResult<()> {
        DISBURSEMENTS.walk(&self.kv, |d| Ok::<_, DisbursementError>(visit(d)))
    }

    fn get_disbursed_total(&self, procurement_id: RecordId) -> DisbursementResult<Amount> {
        Ok(self.total(procurement_id)?)
    }

    fn verify_disbursed_totals(&self) -> DisbursementResult<()> {
        let records = DISBURSEMENTS.all(&self.kv)?;
        let mut recomputed = sum_by_procurement(&records).map_err(|procurement_id| {
            error!(
                "[tc-07] 🚨 Disbursements for procurement #{} overflow the amount range",
                procurement_id
            );
            DisbursementError::TotalOverflow { procurement_id }
        })?;

        for (procurement_id, stored) in TOTALS.entries(&self.kv)? {
            let expected = recomputed.remove(&procurement_id).unwrap_or_default();
            if stored != expected {
                error!(
                    "[tc-07] 🚨 Total for procurement #{} is {}, records sum to {}",
                    procurement_id, stored, expected
                );
                return Err(DisbursementError::TotalsInconsistent {
                    procurement_id,
                    stored,
                    recomputed: expected,
                });
            }
        }
        // records whose procurement has no stored total at all
        if let Some((procurement_id, recomputed)) = recomputed.into_iter().next() {
            error!(
                "[tc-07] 🚨 Procurement #{} has disbursements but no stored total",
                procurement_id
            );
            return Err(DisbursementError::TotalsInconsistent {
                procurement_id,
                stored: Amount::zero(),
                recomputed,
            });
        }

        debug!("[tc-07] Disbursed totals consistent across {} records", records.len());
        Ok(())
    }

    fn export_genesis(&self) -> DisbursementResult<DisbursementGenesis> {
        let state = DISBURSEMENTS.export(&self.kv)?;
        let totals = TOTALS
            .entries(&self.kv)?
            .into_iter()
            .map(|(procurement_id, total)| DisbursedTotal {
                procurement_id,
                total,
            })
            .collect();
        Ok(DisbursementGenesis {
            records: state.records,
            count: state.count,
            totals,
        })
    }

    fn import_genesis(&mut self, genesis: DisbursementGenesis) -> DisbursementResult<()> {
        for disbursement in &genesis.records {
            disbursement
                .validate_basic(self.quorum.addresses().as_ref())
                .map_err(|e| GenesisError::InvalidRecord {
                    kind: Disbursement::KIND,
                    id: disbursement.id,
                    reason: e.to_string(),
                })?;
        }

        let recomputed = sum_by_procurement(&genesis.records).map_err(|procurement_id| {
            GenesisError::InvalidRecord {
                kind: Disbursement::KIND,
                id: procurement_id,
                reason: "disbursed total overflows".to_string(),
            }
        })?;

        let mut exported = std::collections::BTreeMap::new();
        for entry in &genesis.totals {
            if exported.insert(entry.procurement_id, entry.total).is_some() {
                return Err(GenesisError::DuplicateKey {
                    kind: "disbursed total",
                    key: entry.procurement_id.to_string(),
                }
                .into());
            }
        }
        for procurement_id in recomputed.keys().chain(exported.keys()) {
            let ours = recomputed.get(procurement_id).copied().unwrap_or_default();
            let theirs = exported.get(procurement_id).copied().unwrap_or_default();
            if ours != theirs {
                return Err(GenesisError::TotalMismatch {
                    kind: Disbursement::KIND,
                    id: *procurement_id,
                    exported: theirs.to_string(),
                    recomputed: ours.to_string(),
                }
                .into());
            }
        }

        let state = GenesisState {
            records: genesis.records,
            count: genesis.count,
        };
        let mut batch = WriteBatch::new();
        DISBURSEMENTS.import(&self.kv, &mut batch, &state)?;
        for (procurement_id, total) in &recomputed {
            TOTALS.stage(&mut batch, *procurement_id, total)?;
        }
        batch.commit(&mut self.kv)?;

        info!(
            "[tc-07] 🌱 Imported {} disbursements across {} procurements (sequence {})",
            state.records.len(),
            recomputed.len(),
            state.count
        );
        Ok(())
    }
}
