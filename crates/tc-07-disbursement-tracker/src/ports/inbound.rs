//! # Inbound Ports (Driving Ports)

use crate::domain::{Disbursement, DisbursementGenesis, DisbursementResult, DisbursementStatus};
use crate::ports::outbound::ProcurementProvider;
use shared_types::{Amount, RecordId};
use std::ops::ControlFlow;
use tc_03_approval_quorum::{Approval, ScorecardReader};

pub trait DisbursementTrackerApi {
    /// Store a new disbursement in `Scheduled` and add its amount to the
    /// procurement's running total.
    ///
    /// ## Errors
    ///
    /// - `Validation` / `InvalidAddress`: malformed fields
    /// - `ProcurementMissing`: `procurement_id` does not resolve
    /// - `AmountExceeded`: running total would pass the procurement amount;
    ///   nothing is written
    fn register_disbursement(
        &mut self,
        disbursement: Disbursement,
        procurements: &dyn ProcurementProvider,
    ) -> DisbursementResult<RecordId>;

    /// Advance a disbursement. Released, Verified and Resolved need a quorum.
    fn update_disbursement_status(
        &mut self,
        id: RecordId,
        next: DisbursementStatus,
        scores: &dyn ScorecardReader,
    ) -> DisbursementResult<Disbursement>;

    fn record_disbursement_approval(
        &mut self,
        id: RecordId,
        approval: Approval,
        contract_uri: &str,
        scores: &dyn ScorecardReader,
    ) -> DisbursementResult<Disbursement>;

    fn get_disbursement(&self, id: RecordId) -> DisbursementResult<Disbursement>;

    fn walk_disbursements(
        &self,
        visit: &mut dyn FnMut(Disbursement) -> ControlFlow<()>,
    ) -> DisbursementResult<()>;

    /// Sum of disbursements against a procurement; zero if none.
    fn get_disbursed_total(&self, procurement_id: RecordId) -> DisbursementResult<Amount>;

    /// Re-scan every disbursement and compare with the stored totals.
    fn verify_disbursed_totals(&self) -> DisbursementResult<()>;

    fn export_genesis(&self) -> DisbursementResult<DisbursementGenesis>;

    /// Load an exported state into an empty keeper. Totals are recomputed from
    /// the records and must agree with the exported ones.
    fn import_genesis(&mut self, genesis: DisbursementGenesis) -> DisbursementResult<()>;
}
