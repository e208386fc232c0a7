//! # Inbound Ports (Driving Ports)

use crate::domain::{Procurement, ProcurementResult, ProcurementStatus};
use crate::ports::outbound::BudgetProvider;
use shared_types::RecordId;
use std::ops::ControlFlow;
use tc_01_record_store::GenesisState;
use tc_03_approval_quorum::{Approval, ScorecardReader};

pub trait ProcurementLedgerApi {
    /// Store a new procurement in `Planning` against an existing budget.
    ///
    /// ## Errors
    ///
    /// - `Validation` / `InvalidAddress`: malformed fields
    /// - `BudgetMissing`: `budget_id` does not resolve
    fn register_procurement(
        &mut self,
        procurement: Procurement,
        budgets: &dyn BudgetProvider,
    ) -> ProcurementResult<RecordId>;

    /// Advance a procurement. Awarded, Executing and Completed need a quorum.
    fn update_procurement_status(
        &mut self,
        id: RecordId,
        next: ProcurementStatus,
        scores: &dyn ScorecardReader,
    ) -> ProcurementResult<Procurement>;

    fn record_procurement_approval(
        &mut self,
        id: RecordId,
        approval: Approval,
        contract_uri: &str,
        scores: &dyn ScorecardReader,
    ) -> ProcurementResult<Procurement>;

    fn get_procurement(&self, id: RecordId) -> ProcurementResult<Procurement>;

    fn walk_procurements(
        &self,
        visit: &mut dyn FnMut(Procurement) -> ControlFlow<()>,
    ) -> ProcurementResult<()>;

    fn export_genesis(&self) -> ProcurementResult<GenesisState<Procurement>>;

    fn import_genesis(&mut self, state: GenesisState<Procurement>) -> ProcurementResult<()>;
}
