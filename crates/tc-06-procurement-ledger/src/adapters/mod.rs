//! # Adapters
//!
//! `BudgetProvider` over the budget keeper, plus a map-backed double.

use crate::ports::outbound::BudgetProvider;
use shared_types::RecordId;
use std::collections::BTreeMap;
use tc_01_record_store::{KeyValueStore, StoreError};
use tc_05_budget_registry::{Budget, BudgetKeeper};

impl<KV: KeyValueStore> BudgetProvider for BudgetKeeper<KV> {
    fn budget(&self, id: RecordId) -> Result<Option<Budget>, StoreError> {
        self.find_budget(id)
    }
}

/// Map-backed `BudgetProvider` for tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryBudgets {
    budgets: BTreeMap<RecordId, Budget>,
}

impl InMemoryBudgets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert under the budget's own id.
    pub fn insert(&mut self, budget: Budget) {
        self.budgets.insert(budget.id, budget);
    }
}

impl BudgetProvider for InMemoryBudgets {
    fn budget(&self, id: RecordId) -> Result<Option<Budget>, StoreError> {
        Ok(self.budgets.get(&id).cloned())
    }
}
