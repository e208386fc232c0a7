//! # Outbound Ports (Driven Ports)

use shared_types::RecordId;
use tc_01_record_store::StoreError;
use tc_05_budget_registry::Budget;

/// Budget lookups used to link a procurement to its funding.
///
/// `Ok(None)` means no such budget; `Err` is a storage failure.
pub trait BudgetProvider {
    fn budget(&self, id: RecordId) -> Result<Option<Budget>, StoreError>;
}
