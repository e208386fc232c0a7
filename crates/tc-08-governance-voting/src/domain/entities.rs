use crate::domain::errors::{DelegationError, DelegationResult};
use serde::{Deserialize, Serialize};
use shared_types::{is_blank, AddressValidator, CompositeKey, RecordId, UNASSIGNED_ID};
use tc_01_record_store::{IndexedRecord, Record};

/// A delegator hands a scope of voting accountability to a delegatee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delegation {
    pub id: RecordId,
    pub delegator: String,
    pub delegatee: String,
    pub scope: String,
    /// Opaque expiry marker (block height or unix time); 0 means none.
    pub expires_at: u64,
    pub active: bool,
    pub metadata_uri: String,
}

impl Delegation {
    pub fn new(
        delegator: impl Into<String>,
        delegatee: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        Self {
            id: UNASSIGNED_ID,
            delegator: delegator.into(),
            delegatee: delegatee.into(),
            scope: scope.into(),
            expires_at: 0,
            active: true,
            metadata_uri: String::new(),
        }
    }

    pub fn with_expiry(mut self, expires_at: u64) -> Self {
        self.expires_at = expires_at;
        self
    }

    pub fn with_metadata(mut self, uri: impl Into<String>) -> Self {
        self.metadata_uri = uri.into();
        self
    }

    pub fn validate_fields(&self, addresses: &dyn AddressValidator) -> DelegationResult<()> {
        if is_blank(&self.delegator) {
            return Err(DelegationError::validation("delegator address is required"));
        }
        if is_blank(&self.delegatee) {
            return Err(DelegationError::validation("delegatee address is required"));
        }
        if is_blank(&self.scope) {
            return Err(DelegationError::validation("scope is required"));
        }
        for (field, address) in [("delegator", &self.delegator), ("delegatee", &self.delegatee)] {
            addresses
                .validate(address)
                .map_err(|source| DelegationError::InvalidAddress { field, source })?;
        }
        Ok(())
    }

    pub fn validate_basic(&self, addresses: &dyn AddressValidator) -> DelegationResult<()> {
        if self.id == UNASSIGNED_ID {
            return Err(DelegationError::validation("delegation id must be set"));
        }
        self.validate_fields(addresses)
    }
}

impl Record for Delegation {
    const KIND: &'static str = "delegation";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

impl IndexedRecord for Delegation {
    fn index_key(&self) -> CompositeKey {
        CompositeKey::new(&self.delegator, &self.scope)
    }
}
