use crate::ports::outbound::ScorecardReader;
use shared_types::{CompositeKey, RecordId};
use std::collections::BTreeMap;
use tc_01_record_store::{IndexedRecord, StoreError};
use tc_02_accountability_scores::Scorecard;

/// Map-backed `ScorecardReader` for tests.
///
/// Ids are taken from the inserted scorecard, or assigned sequentially
/// when unset.
#[derive(Debug, Default, Clone)]
pub struct InMemoryScorecards {
    cards: BTreeMap<RecordId, Scorecard>,
}

impl InMemoryScorecards {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, mut card: Scorecard) -> RecordId {
        if card.id == 0 {
            card.id = self.cards.keys().next_back().copied().unwrap_or(0) + 1;
        }
        let id = card.id;
        self.cards.insert(id, card);
        id
    }

    pub fn remove(&mut self, id: RecordId) -> Option<Scorecard> {
        self.cards.remove(&id)
    }
}

impl ScorecardReader for InMemoryScorecards {
    fn scorecard(&self, id: RecordId) -> Result<Option<Scorecard>, StoreError> {
        Ok(self.cards.get(&id).cloned())
    }

    fn scorecard_by_subject_metric(
        &self,
        subject: &str,
        metric: &str,
    ) -> Result<Option<Scorecard>, StoreError> {
        let key = CompositeKey::new(subject, metric);
        Ok(self.cards.values().find(|c| c.index_key() == key).cloned())
    }
}
