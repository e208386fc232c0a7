//! Approval value and the trait records implement to carry approvals.

use crate::domain::errors::{ApprovalError, ApprovalResult};
use serde::{Deserialize, Serialize};
use shared_types::{is_blank, AddressValidator, NormalizedKey, RecordId, UNASSIGNED_ID};

/// A signed endorsement embedded in a budget, procurement or disbursement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approval {
    pub signer: String,
    pub role: String,
    /// Scorecard whose subject must be the signer.
    pub scorecard_id: RecordId,
    pub signature_uri: String,
}

impl Approval {
    pub fn new(
        signer: impl Into<String>,
        role: impl Into<String>,
        scorecard_id: RecordId,
        signature_uri: impl Into<String>,
    ) -> Self {
        Self {
            signer: signer.into(),
            role: role.into(),
            scorecard_id,
            signature_uri: signature_uri.into(),
        }
    }

    pub fn role_key(&self) -> NormalizedKey {
        NormalizedKey::new(&self.role)
    }

    pub fn signer_key(&self) -> NormalizedKey {
        NormalizedKey::new(&self.signer)
    }

    /// Same normalized role or same normalized signer.
    pub fn conflicts_with(&self, other: &Approval) -> bool {
        self.role_key() == other.role_key() || self.signer_key() == other.signer_key()
    }

    /// Stateless payload checks.
    pub fn validate_basic(&self) -> ApprovalResult<()> {
        if is_blank(&self.signer) {
            return Err(ApprovalError::invalid("signer address is required"));
        }
        if is_blank(&self.role) {
            return Err(ApprovalError::invalid("role is required"));
        }
        if self.scorecard_id == UNASSIGNED_ID {
            return Err(ApprovalError::invalid("scorecard id must be set"));
        }
        if is_blank(&self.signature_uri) {
            return Err(ApprovalError::invalid("signature_uri is required"));
        }
        Ok(())
    }

    /// `validate_basic` plus signer address parsing.
    pub fn validate(&self, addresses: &dyn AddressValidator) -> ApprovalResult<()> {
        self.validate_basic()?;
        addresses
            .validate(&self.signer)
            .map_err(|source| ApprovalError::InvalidSigner {
                signer: self.signer.clone(),
                source,
            })
    }
}

/// A record that accumulates approvals under a liability contract.
pub trait Approvable: Clone {
    fn liability_contract_uri(&self) -> &str;

    fn set_liability_contract_uri(&mut self, uri: String);

    fn approvals(&self) -> &[Approval];

    fn approvals_mut(&mut self) -> &mut Vec<Approval>;
}

/// Stateless check shared by every approvable record: the contract rule for
/// records past their initial status, each embedded approval's payload and
/// signer, and distinct normalized roles and signers across the set.
pub fn validate_approvals<R: Approvable>(
    record: &R,
    past_initial: bool,
    addresses: &dyn AddressValidator,
) -> ApprovalResult<()> {
    if past_initial && is_blank(record.liability_contract_uri()) {
        return Err(ApprovalError::LiabilityContractMissing);
    }
    let approvals = record.approvals();
    for (i, approval) in approvals.iter().enumerate() {
        approval.validate(addresses)?;
        if approvals[..i].iter().any(|prior| prior.conflicts_with(approval)) {
            return Err(ApprovalError::DuplicateApproval {
                role: approval.role.clone(),
                signer: approval.signer.clone(),
            });
        }
    }
    Ok(())
}
