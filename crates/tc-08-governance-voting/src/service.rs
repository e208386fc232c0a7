//! # Delegation Keeper

use crate::domain::{Delegation, DelegationError, DelegationResult};
use crate::ports::inbound::GovernanceVotingApi;
use shared_types::{AddressValidator, CompositeKey, RecordId, UNASSIGNED_ID};
use std::ops::ControlFlow;
use std::sync::Arc;
use tc_01_record_store::{
    GenesisError, GenesisState, InMemoryKVStore, KeyValueStore, Record, RecordCollection,
    StoreError, WriteBatch,
};
use tracing::{debug, info, warn};

/// Key prefixes inside the keeper's store.
pub mod prefix {
    pub const DELEGATIONS: u8 = 0x01;
    pub const DELEGATION_SEQ: u8 = 0x02;
    pub const DELEGATION_INDEX: u8 = 0x03;
}

const DELEGATIONS: RecordCollection<Delegation> =
    RecordCollection::new(prefix::DELEGATIONS, prefix::DELEGATION_SEQ)
        .with_index(prefix::DELEGATION_INDEX);

pub struct DelegationKeeper<KV: KeyValueStore> {
    kv: KV,
    addresses: Arc<dyn AddressValidator>,
}

impl<KV: KeyValueStore> DelegationKeeper<KV> {
    pub fn new(kv: KV, addresses: Arc<dyn AddressValidator>) -> Self {
        Self { kv, addresses }
    }

    pub fn store(&self) -> &KV {
        &self.kv
    }
}

impl DelegationKeeper<InMemoryKVStore> {
    pub fn in_memory(addresses: Arc<dyn AddressValidator>) -> Self {
        Self::new(InMemoryKVStore::new(), addresses)
    }
}

impl<KV: KeyValueStore> GovernanceVotingApi for DelegationKeeper<KV> {
    fn register_delegation(&mut self, mut delegation: Delegation) -> DelegationResult<RecordId> {
        if let Err(e) = delegation.validate_fields(self.addresses.as_ref()) {
            warn!(delegator = %delegation.delegator, "[tc-08] ❌ Delegation rejected: {}", e);
            return Err(e);
        }
        if delegation.id != UNASSIGNED_ID && !DELEGATIONS.exists(&self.kv, delegation.id)? {
            return Err(StoreError::NotFound {
                kind: Delegation::KIND,
                id: delegation.id,
            }
            .into());
        }
        delegation.active = true;

        let mut batch = WriteBatch::new();
        let id = DELEGATIONS.upsert(&self.kv, &mut batch, &mut delegation)?;
        batch.commit(&mut self.kv)?;

        info!(
            "[tc-08] 🤝 Delegation #{} {} -> {} for scope {}",
            id, delegation.delegator, delegation.delegatee, delegation.scope
        );
        Ok(id)
    }

    fn deactivate_delegation(&mut self, id: RecordId) -> DelegationResult<Delegation> {
        let mut delegation = DELEGATIONS.get(&self.kv, id)?;
        if !delegation.active {
            return Ok(delegation);
        }
        delegation.active = false;

        let mut batch = WriteBatch::new();
        DELEGATIONS.stage(&mut batch, &delegation)?;
        batch.commit(&mut self.kv)?;

        info!("[tc-08] 🔕 Delegation #{} deactivated", id);
        Ok(delegation)
    }

    fn get_delegation(&self, id: RecordId) -> DelegationResult<Delegation> {
        debug!("[tc-08] Lookup delegation #{}", id);
        Ok(DELEGATIONS.get(&self.kv, id)?)
    }

    fn get_delegation_by_scope(
        &self,
        delegator: &str,
        scope: &str,
    ) -> DelegationResult<Delegation> {
        Ok(DELEGATIONS.get_by_key(&self.kv, &CompositeKey::new(delegator, scope))?)
    }

    fn walk_delegations(
        &self,
        visit: &mut dyn FnMut(Delegation) -> ControlFlow<()>,
    ) -> DelegationResult<()> {
        DELEGATIONS.walk(&self.kv, |d| Ok::<_, DelegationError>(visit(d)))
    }

    fn export_genesis(&self) -> DelegationResult<GenesisState<Delegation>> {
        Ok(DELEGATIONS.export(&self.kv)?)
    }

    fn import_genesis(&mut self, state: GenesisState<Delegation>) -> DelegationResult<()> {
        for delegation in &state.records {
            delegation
                .validate_basic(self.addresses.as_ref())
                .map_err(|e| GenesisError::InvalidRecord {
                    kind: Delegation::KIND,
                    id: delegation.id,
                    reason: e.to_string(),
                })?;
        }

        let mut batch = WriteBatch::new();
        DELEGATIONS.import_indexed(&self.kv, &mut batch, &state)?;
        batch.commit(&mut self.kv)?;

        info!(
            "[tc-08] 🌱 Imported {} delegations (sequence {})",
            state.records.len(),
            state.count
        );
        Ok(())
    }
}
