//! Disbursement entity, its status graph and the genesis shape.

use crate::domain::errors::{DisbursementError, DisbursementResult};
use serde::{Deserialize, Serialize};
use shared_types::{is_blank, AddressValidator, Amount, RecordId, UNASSIGNED_ID};
use std::fmt;
use tc_01_record_store::Record;
use tc_03_approval_quorum::{validate_approvals, Approvable, Approval};
use tc_04_lifecycle::{LifecycleRecord, LifecycleStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DisbursementStatus {
    #[default]
    #[serde(rename = "DISBURSEMENT_STATUS_SCHEDULED")]
    Scheduled,
    #[serde(rename = "DISBURSEMENT_STATUS_RELEASED")]
    Released,
    #[serde(rename = "DISBURSEMENT_STATUS_VERIFIED")]
    Verified,
    #[serde(rename = "DISBURSEMENT_STATUS_DISPUTED")]
    Disputed,
    #[serde(rename = "DISBURSEMENT_STATUS_RESOLVED")]
    Resolved,
}

impl DisbursementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisbursementStatus::Scheduled => "DISBURSEMENT_STATUS_SCHEDULED",
            DisbursementStatus::Released => "DISBURSEMENT_STATUS_RELEASED",
            DisbursementStatus::Verified => "DISBURSEMENT_STATUS_VERIFIED",
            DisbursementStatus::Disputed => "DISBURSEMENT_STATUS_DISPUTED",
            DisbursementStatus::Resolved => "DISBURSEMENT_STATUS_RESOLVED",
        }
    }
}

impl fmt::Display for DisbursementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl LifecycleStatus for DisbursementStatus {
    fn initial() -> Self {
        DisbursementStatus::Scheduled
    }

    fn allowed_transitions(&self) -> &'static [Self] {
        use DisbursementStatus::*;
        match self {
            Scheduled => &[Released, Disputed],
            Released => &[Verified, Disputed],
            Verified => &[Resolved],
            Disputed => &[Resolved],
            Resolved => &[],
        }
    }

    fn requires_quorum(&self) -> bool {
        matches!(
            self,
            DisbursementStatus::Released | DisbursementStatus::Verified | DisbursementStatus::Resolved
        )
    }
}

/// A release of funds against one procurement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disbursement {
    pub id: RecordId,
    pub procurement_id: RecordId,
    pub amount: Amount,
    pub currency: String,
    pub status: DisbursementStatus,
    pub evidence_uri: String,
    pub notes: String,
    pub performed_by: String,
    pub liability_contract_uri: String,
    pub approvals: Vec<Approval>,
}

impl Disbursement {
    pub fn new(
        procurement_id: RecordId,
        amount: Amount,
        currency: impl Into<String>,
        performed_by: impl Into<String>,
    ) -> Self {
        Self {
            id: UNASSIGNED_ID,
            procurement_id,
            amount,
            currency: currency.into(),
            status: DisbursementStatus::Scheduled,
            evidence_uri: String::new(),
            notes: String::new(),
            performed_by: performed_by.into(),
            liability_contract_uri: String::new(),
            approvals: Vec::new(),
        }
    }

    pub fn with_evidence(mut self, uri: impl Into<String>) -> Self {
        self.evidence_uri = uri.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn validate_fields(&self, addresses: &dyn AddressValidator) -> DisbursementResult<()> {
        if self.procurement_id == UNASSIGNED_ID {
            return Err(DisbursementError::validation("procurement id is required"));
        }
        if self.amount.is_zero() {
            return Err(DisbursementError::validation("amount must be positive"));
        }
        if is_blank(&self.currency) {
            return Err(DisbursementError::validation("currency is required"));
        }
        if is_blank(&self.performed_by) {
            return Err(DisbursementError::validation("performed_by is required"));
        }
        addresses
            .validate(&self.performed_by)
            .map_err(|source| DisbursementError::InvalidAddress {
                field: "performed_by",
                source,
            })?;
        validate_approvals(self, !self.status.is_initial(), addresses)?;
        Ok(())
    }

    pub fn validate_basic(&self, addresses: &dyn AddressValidator) -> DisbursementResult<()> {
        if self.id == UNASSIGNED_ID {
            return Err(DisbursementError::validation("disbursement id must be set"));
        }
        self.validate_fields(addresses)
    }
}

impl Record for Disbursement {
    const KIND: &'static str = "disbursement";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

impl Approvable for Disbursement {
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

impl LifecycleRecord for Disbursement {
    type Status = DisbursementStatus;

    fn status(&self) -> DisbursementStatus {
        self.status
    }

    fn set_status(&mut self, status: DisbursementStatus) {
        self.status = status;
    }
}

/// Running total for one procurement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisbursedTotal {
    pub procurement_id: RecordId,
    pub total: Amount,
}

/// Exported disbursement state: records, sequence and running totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisbursementGenesis {
    pub records: Vec<Disbursement>,
    pub count: u64,
    pub totals: Vec<DisbursedTotal>,
}
