//! # Inbound Ports (Driving Ports)
//!
//! Operations the scorecard keeper exposes to the runtime and to other keepers.

use crate::domain::{Scorecard, ScorecardResult};
use shared_types::RecordId;
use std::ops::ControlFlow;
use tc_01_record_store::GenesisState;

pub trait AccountabilityScoresApi {
    /// Create or replace the scorecard for a normalized `(subject, metric)`.
    ///
    /// Returns the id, which is stable across updates to the same pair.
    ///
    /// ## Errors
    ///
    /// - `Validation`: blank subject/metric/updater, score above 100, zero weight
    /// - `InvalidAddress`: `updated_by` does not parse
    /// - `Store(NotFound)`: a non-zero id that matches no stored scorecard
    fn upsert_scorecard(&mut self, scorecard: Scorecard) -> ScorecardResult<RecordId>;

    fn get_scorecard(&self, id: RecordId) -> ScorecardResult<Scorecard>;

    /// Lookup by normalized subject and metric.
    fn get_scorecard_by_subject_metric(
        &self,
        subject: &str,
        metric: &str,
    ) -> ScorecardResult<Scorecard>;

    /// Visit scorecards ascending by id until the visitor breaks.
    fn walk_scorecards(
        &self,
        visit: &mut dyn FnMut(Scorecard) -> ControlFlow<()>,
    ) -> ScorecardResult<()>;

    fn export_genesis(&self) -> ScorecardResult<GenesisState<Scorecard>>;

    /// Load an exported state into an empty keeper.
    fn import_genesis(&mut self, state: GenesisState<Scorecard>) -> ScorecardResult<()>;
}
