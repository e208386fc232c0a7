use crate::ports::outbound::ScorecardReader;
use shared_types::RecordId;
use tc_01_record_store::{KeyValueStore, StoreError};
use tc_02_accountability_scores::{Scorecard, ScorecardKeeper};

impl<KV: KeyValueStore> ScorecardReader for ScorecardKeeper<KV> {
    fn scorecard(&self, id: RecordId) -> Result<Option<Scorecard>, StoreError> {
        self.find_scorecard(id)
    }

    fn scorecard_by_subject_metric(
        &self,
        subject: &str,
        metric: &str,
    ) -> Result<Option<Scorecard>, StoreError> {
        self.find_by_subject_metric(subject, metric)
    }
}
