//! Procurement entity and its status graph.

use crate::domain::errors::{ProcurementError, ProcurementResult};
use serde::{Deserialize, Serialize};
use shared_types::{is_blank, AddressValidator, Amount, RecordId, UNASSIGNED_ID};
use std::fmt;
use tc_01_record_store::Record;
use tc_03_approval_quorum::{validate_approvals, Approvable, Approval};
use tc_04_lifecycle::{LifecycleRecord, LifecycleStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProcurementStatus {
    #[default]
    #[serde(rename = "PROCUREMENT_STATUS_PLANNING")]
    Planning,
    #[serde(rename = "PROCUREMENT_STATUS_TENDERING")]
    Tendering,
    #[serde(rename = "PROCUREMENT_STATUS_AWARDED")]
    Awarded,
    #[serde(rename = "PROCUREMENT_STATUS_EXECUTING")]
    Executing,
    #[serde(rename = "PROCUREMENT_STATUS_COMPLETED")]
    Completed,
    #[serde(rename = "PROCUREMENT_STATUS_CANCELLED")]
    Cancelled,
}

impl ProcurementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcurementStatus::Planning => "PROCUREMENT_STATUS_PLANNING",
            ProcurementStatus::Tendering => "PROCUREMENT_STATUS_TENDERING",
            ProcurementStatus::Awarded => "PROCUREMENT_STATUS_AWARDED",
            ProcurementStatus::Executing => "PROCUREMENT_STATUS_EXECUTING",
            ProcurementStatus::Completed => "PROCUREMENT_STATUS_COMPLETED",
            ProcurementStatus::Cancelled => "PROCUREMENT_STATUS_CANCELLED",
        }
    }
}

impl fmt::Display for ProcurementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl LifecycleStatus for ProcurementStatus {
    fn initial() -> Self {
        ProcurementStatus::Planning
    }

    fn allowed_transitions(&self) -> &'static [Self] {
        use ProcurementStatus::*;
        match self {
            Planning => &[Tendering, Cancelled],
            Tendering => &[Awarded, Cancelled],
            Awarded => &[Executing, Cancelled],
            Executing => &[Completed, Cancelled],
            Completed | Cancelled => &[],
        }
    }

    /// Award, execution and completion need a quorum; tendering and
    /// cancellation do not.
    fn requires_quorum(&self) -> bool {
        matches!(
            self,
            ProcurementStatus::Awarded | ProcurementStatus::Executing | ProcurementStatus::Completed
        )
    }
}

/// A tender or contract funded by one budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Procurement {
    pub id: RecordId,
    pub budget_id: RecordId,
    pub reference: String,
    pub agency: String,
    pub title: String,
    pub category: String,
    /// Cap on the sum of disbursements against this procurement.
    pub amount: Amount,
    pub currency: String,
    pub supplier: String,
    pub status: ProcurementStatus,
    pub metadata_uri: String,
    pub officer: String,
    pub liability_contract_uri: String,
    pub approvals: Vec<Approval>,
}

impl Procurement {
    pub fn new(
        budget_id: RecordId,
        reference: impl Into<String>,
        agency: impl Into<String>,
        title: impl Into<String>,
        amount: Amount,
        currency: impl Into<String>,
        officer: impl Into<String>,
    ) -> Self {
        Self {
            id: UNASSIGNED_ID,
            budget_id,
            reference: reference.into(),
            agency: agency.into(),
            title: title.into(),
            category: String::new(),
            amount,
            currency: currency.into(),
            supplier: String::new(),
            status: ProcurementStatus::Planning,
            metadata_uri: String::new(),
            officer: officer.into(),
            liability_contract_uri: String::new(),
            approvals: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = supplier.into();
        self
    }

    pub fn with_metadata(mut self, uri: impl Into<String>) -> Self {
        self.metadata_uri = uri.into();
        self
    }

    pub fn validate_fields(&self, addresses: &dyn AddressValidator) -> ProcurementResult<()> {
        if self.budget_id == UNASSIGNED_ID {
            return Err(ProcurementError::validation("budget id is required"));
        }
        if is_blank(&self.reference) {
            return Err(ProcurementError::validation("reference is required"));
        }
        if is_blank(&self.agency) {
            return Err(ProcurementError::validation("agency is required"));
        }
        if is_blank(&self.title) {
            return Err(ProcurementError::validation("title is required"));
        }
        if self.amount.is_zero() {
            return Err(ProcurementError::validation("amount must be positive"));
        }
        if is_blank(&self.currency) {
            return Err(ProcurementError::validation("currency is required"));
        }
        if is_blank(&self.officer) {
            return Err(ProcurementError::validation("procurement officer is required"));
        }
        addresses
            .validate(&self.officer)
            .map_err(|source| ProcurementError::InvalidAddress {
                field: "officer",
                source,
            })?;
        validate_approvals(self, !self.status.is_initial(), addresses)?;
        Ok(())
    }

    pub fn validate_basic(&self, addresses: &dyn AddressValidator) -> ProcurementResult<()> {
        if self.id == UNASSIGNED_ID {
            return Err(ProcurementError::validation("procurement id must be set"));
        }
        self.validate_fields(addresses)
    }
}

impl Record for Procurement {
    const KIND: &'static str = "procurement";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

impl Approvable for Procurement {
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

impl LifecycleRecord for Procurement {
    type Status = ProcurementStatus;

    fn status(&self) -> ProcurementStatus {
        self.status
    }

    fn set_status(&mut self, status: ProcurementStatus) {
        self.status = status;
    }
}
