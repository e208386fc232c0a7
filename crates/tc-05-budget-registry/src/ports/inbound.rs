//! # Inbound Ports (Driving Ports)

use crate::domain::{Budget, BudgetResult, BudgetStatus};
use shared_types::RecordId;
use std::ops::ControlFlow;
use tc_01_record_store::GenesisState;
use tc_03_approval_quorum::{Approval, ScorecardReader};

pub trait BudgetRegistryApi {
    /// Store a new budget in `Draft` and return its id.
    ///
    /// Client-supplied id, status and approvals are ignored.
    fn register_budget(&mut self, budget: Budget) -> BudgetResult<RecordId>;

    /// Advance a budget. Every non-draft target needs a quorum.
    ///
    /// Moving to the current status succeeds without a write.
    fn update_budget_status(
        &mut self,
        id: RecordId,
        next: BudgetStatus,
        scores: &dyn ScorecardReader,
    ) -> BudgetResult<Budget>;

    /// Add or replace an approval; see `ApprovalQuorumApi::record_approval`.
    fn record_budget_approval(
        &mut self,
        id: RecordId,
        approval: Approval,
        contract_uri: &str,
        scores: &dyn ScorecardReader,
    ) -> BudgetResult<Budget>;

    fn get_budget(&self, id: RecordId) -> BudgetResult<Budget>;

    fn has_budget(&self, id: RecordId) -> BudgetResult<bool>;

    fn walk_budgets(&self, visit: &mut dyn FnMut(Budget) -> ControlFlow<()>)
        -> BudgetResult<()>;

    fn export_genesis(&self) -> BudgetResult<GenesisState<Budget>>;

    fn import_genesis(&mut self, state: GenesisState<Budget>) -> BudgetResult<()>;
}
