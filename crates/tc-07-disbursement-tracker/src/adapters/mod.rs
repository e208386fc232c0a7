//! # Adapters
//!
//! `ProcurementProvider` over the procurement keeper, plus a map-backed double.

use crate::ports::outbound::ProcurementProvider;
use shared_types::RecordId;
use std::collections::BTreeMap;
use tc_01_record_store::{KeyValueStore, StoreError};
use tc_06_procurement_ledger::{Procurement, ProcurementKeeper};

impl<KV: KeyValueStore> ProcurementProvider for ProcurementKeeper<KV> {
    fn procurement(&self, id: RecordId) -> Result<Option<Procurement>, StoreError> {
        self.find_procurement(id)
    }
}

/// Map-backed `ProcurementProvider` for tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProcurements {
    procurements: BTreeMap<RecordId, Procurement>,
}

impl InMemoryProcurements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert under the procurement's own id.
    pub fn insert(&mut self, procurement: Procurement) {
        self.procurements.insert(procurement.id, procurement);
    }
}

impl ProcurementProvider for InMemoryProcurements {
    fn procurement(&self, id: RecordId) -> Result<Option<Procurement>, StoreError> {
        Ok(self.procurements.get(&id).cloned())
    }
}
