//! # Outbound Ports (Driven Ports)
//!
//! What the quorum validator needs from the scorecard keeper.

use tc_01_record_store::StoreError;
use tc_02_accountability_scores::Scorecard;
use shared_types::RecordId;

/// Read access to trust scorecards.
///
/// `Ok(None)` means the scorecard does not exist; `Err` is a storage failure.
pub trait ScorecardReader {
    fn scorecard(&self, id: RecordId) -> Result<Option<Scorecard>, StoreError>;

    fn scorecard_by_subject_metric(
        &self,
        subject: &str,
        metric: &str,
    ) -> Result<Option<Scorecard>, StoreError>;
}
