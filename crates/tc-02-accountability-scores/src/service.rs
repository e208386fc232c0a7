//! # Scorecard Keeper
//!
//! Owns the scorecard collection and its `(subject, metric)` index.

use crate::domain::{Scorecard, ScorecardError, ScorecardResult};
use crate::ports::inbound::AccountabilityScoresApi;
use shared_types::{AddressValidator, CompositeKey, RecordId, UNASSIGNED_ID};
use std::ops::ControlFlow;
use std::sync::Arc;
use tc_01_record_store::{
    GenesisError, GenesisState, InMemoryKVStore, KeyValueStore, Record, RecordCollection,
    StoreError, StoreResult, WriteBatch,
};
use tracing::{debug, info, warn};

/// Key prefixes inside the keeper's store.
pub mod prefix {
    pub const SCORECARDS: u8 = 0x01;
    pub const SCORECARD_SEQ: u8 = 0x02;
    pub const SCORECARD_INDEX: u8 = 0x03;
}

const SCORECARDS: RecordCollection<Scorecard> =
    RecordCollection::new(prefix::SCORECARDS, prefix::SCORECARD_SEQ)
        .with_index(prefix::SCORECARD_INDEX);

pub struct ScorecardKeeper<KV: KeyValueStore> {
    kv: KV,
    addresses: Arc<dyn AddressValidator>,
}

impl<KV: KeyValueStore> ScorecardKeeper<KV> {
    pub fn new(kv: KV, addresses: Arc<dyn AddressValidator>) -> Self {
        Self { kv, addresses }
    }

    pub fn store(&self) -> &KV {
        &self.kv
    }

    /// `get_scorecard` without the not-found error, for collaborator readers.
    pub fn find_scorecard(&self, id: RecordId) -> StoreResult<Option<Scorecard>> {
        SCORECARDS.find(&self.kv, id)
    }

    pub fn find_by_subject_metric(
        &self,
        subject: &str,
        metric: &str,
    ) -> StoreResult<Option<Scorecard>> {
        match SCORECARDS.lookup(&self.kv, &CompositeKey::new(subject, metric))? {
            Some(id) => SCORECARDS.find(&self.kv, id),
            None => Ok(None),
        }
    }
}

impl ScorecardKeeper<InMemoryKVStore> {
    pub fn in_memory(addresses: Arc<dyn AddressValidator>) -> Self {
        Self::new(InMemoryKVStore::new(), addresses)
    }
}

impl<KV: KeyValueStore> AccountabilityScoresApi for ScorecardKeeper<KV> {
    fn upsert_scorecard(&mut self, mut scorecard: Scorecard) -> ScorecardResult<RecordId> {
        if let Err(e) = scorecard.validate_fields(self.addresses.as_ref()) {
            warn!(subject = %scorecard.subject, metric = %scorecard.metric, "[tc-02] ❌ Scorecard rejected: {}", e);
            return Err(e);
        }
        if scorecard.id != UNASSIGNED_ID && !SCORECARDS.exists(&self.kv, scorecard.id)? {
            warn!(id = scorecard.id, "[tc-02] ❌ Scorecard update targets unknown id");
            return Err(StoreError::NotFound {
                kind: Scorecard::KIND,
                id: scorecard.id,
            }
            .into());
        }

        let mut batch = WriteBatch::new();
        let id = SCORECARDS.upsert(&self.kv, &mut batch, &mut scorecard)?;
        batch.commit(&mut self.kv)?;

        info!(
            "[tc-02] 📊 Scorecard #{} set: ({}, {}) = {}",
            id, scorecard.subject, scorecard.metric, scorecard.score
        );
        Ok(id)
    }

    fn get_scorecard(&self, id: RecordId) -> ScorecardResult<Scorecard> {
        debug!("[tc-02] Lookup scorecard #{}", id);
        Ok(SCORECARDS.get(&self.kv, id)?)
    }

    fn get_scorecard_by_subject_metric(
        &self,
        subject: &str,
        metric: &str,
    ) -> ScorecardResult<Scorecard> {
        let key = CompositeKey::new(subject, metric);
        debug!("[tc-02] Lookup scorecard by key {}", key);
        Ok(SCORECARDS.get_by_key(&self.kv, &key)?)
    }

    fn walk_scorecards(
        &self,
        visit: &mut dyn FnMut(Scorecard) -> ControlFlow<()>,
    ) -> ScorecardResult<()> {
        SCORECARDS.walk(&self.kv, |card| Ok::<_, ScorecardError>(visit(card)))
    }

    fn export_genesis(&self) -> ScorecardResult<GenesisState<Scorecard>> {
        Ok(SCORECARDS.export(&self.kv)?)
    }

    fn import_genesis(&mut self, state: GenesisState<Scorecard>) -> ScorecardResult<()> {
        for card in &state.records {
            card.validate_basic(self.addresses.as_ref())
                .map_err(|e| GenesisError::InvalidRecord {
                    kind: Scorecard::KIND,
                    id: card.id,
                    reason: e.to_string(),
                })?;
        }

        let mut batch = WriteBatch::new();
        SCORECARDS.import_indexed(&self.kv, &mut batch, &state)?;
        batch.commit(&mut self.kv)?;

        info!(
            "[tc-02] 🌱 Imported {} scorecards (sequence {})",
            state.records.len(),
            state.count
        );
        Ok(())
    }
}
