//! Budget entity and its status graph.

use crate::domain::errors::{BudgetError, BudgetResult};
use serde::{Deserialize, Serialize};
use shared_types::{is_blank, AddressValidator, Amount, RecordId, UNASSIGNED_ID};
use std::fmt;
use tc_01_record_store::Record;
use tc_03_approval_quorum::{validate_approvals, Approvable, Approval};
use tc_04_lifecycle::{LifecycleRecord, LifecycleStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BudgetStatus {
    #[default]
    #[serde(rename = "BUDGET_STATUS_DRAFT")]
    Draft,
    #[serde(rename = "BUDGET_STATUS_LEGISLATED")]
    Legislated,
    #[serde(rename = "BUDGET_STATUS_EXECUTING")]
    Executing,
    #[serde(rename = "BUDGET_STATUS_COMPLETED")]
    Completed,
    #[serde(rename = "BUDGET_STATUS_ARCHIVED")]
    Archived,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetStatus::Draft => "BUDGET_STATUS_DRAFT",
            BudgetStatus::Legislated => "BUDGET_STATUS_LEGISLATED",
            BudgetStatus::Executing => "BUDGET_STATUS_EXECUTING",
            BudgetStatus::Completed => "BUDGET_STATUS_COMPLETED",
            BudgetStatus::Archived => "BUDGET_STATUS_ARCHIVED",
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl LifecycleStatus for BudgetStatus {
    fn initial() -> Self {
        BudgetStatus::Draft
    }

    fn allowed_transitions(&self) -> &'static [Self] {
        use BudgetStatus::*;
        match self {
            Draft => &[Legislated, Archived],
            Legislated => &[Executing, Archived],
            Executing => &[Completed, Archived],
            Completed => &[Archived],
            Archived => &[],
        }
    }

    /// Every stage past draft needs a quorum.
    fn requires_quorum(&self) -> bool {
        *self != BudgetStatus::Draft
    }
}

/// Planned allocation for one agency and fiscal period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub id: RecordId,
    pub agency: String,
    pub fiscal_year: String,
    pub title: String,
    pub amount: Amount,
    pub currency: String,
    pub metadata_uri: String,
    pub status: BudgetStatus,
    pub created_by: String,
    /// Required once the budget leaves draft.
    pub liability_contract_uri: String,
    pub approvals: Vec<Approval>,
}

impl Budget {
    pub fn new(
        agency: impl Into<String>,
        fiscal_year: impl Into<String>,
        title: impl Into<String>,
        amount: Amount,
        currency: impl Into<String>,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            id: UNASSIGNED_ID,
            agency: agency.into(),
            fiscal_year: fiscal_year.into(),
            title: title.into(),
            amount,
            currency: currency.into(),
            metadata_uri: String::new(),
            status: BudgetStatus::Draft,
            created_by: created_by.into(),
            liability_contract_uri: String::new(),
            approvals: Vec::new(),
        }
    }

    pub fn with_metadata(mut self, uri: impl Into<String>) -> Self {
        self.metadata_uri = uri.into();
        self
    }

    pub fn with_liability_contract(mut self, uri: impl Into<String>) -> Self {
        self.liability_contract_uri = uri.into();
        self
    }

    /// Checks that do not depend on the id.
    pub fn validate_fields(&self, addresses: &dyn AddressValidator) -> BudgetResult<()> {
        if is_blank(&self.agency) {
            return Err(BudgetError::validation("agency is required"));
        }
        if is_blank(&self.fiscal_year) {
            return Err(BudgetError::validation("fiscal year is required"));
        }
        if is_blank(&self.title) {
            return Err(BudgetError::validation("title is required"));
        }
        if self.amount.is_zero() {
            return Err(BudgetError::validation("amount must be positive"));
        }
        if is_blank(&self.currency) {
            return Err(BudgetError::validation("currency is required"));
        }
        if is_blank(&self.created_by) {
            return Err(BudgetError::validation("creator address is required"));
        }
        addresses
            .validate(&self.created_by)
            .map_err(|source| BudgetError::InvalidAddress {
                field: "created_by",
                source,
            })?;
        validate_approvals(self, !self.status.is_initial(), addresses)?;
        Ok(())
    }

    /// Full check for a persisted budget.
    pub fn validate_basic(&self, addresses: &dyn AddressValidator) -> BudgetResult<()> {
        if self.id == UNASSIGNED_ID {
            return Err(BudgetError::validation("budget identifier must be set"));
        }
        self.validate_fields(addresses)
    }
}

impl Record for Budget {
    const KIND: &'static str = "budget";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

impl Approvable for Budget {
    fn liability_contract_uri(&self) -> &str {
        &self.liability_contract_uri
    }

    fn set_liability_contract_uri(&mut self, uri: String) {
        self.liability_contract_uri = uri;
    }

    fn approvals(&self) -> &[Approval] {
        &self.approvals
    }

    fn approvals_mut(&mut self) -> &mut Vec<Approval> {
        &mut self.approvals
    }
}

impl LifecycleRecord for Budget {
    type Status = BudgetStatus;

    fn status(&self) -> BudgetStatus {
        self.status
    }

    fn set_status(&mut self, status: BudgetStatus) {
        self.status = status;
    }
}
