//! Scorecard entity.

use serde::{Deserialize, Serialize};
use shared_types::{is_blank, AddressValidator, CompositeKey, RecordId, UNASSIGNED_ID};
use tc_01_record_store::{IndexedRecord, Record};

use crate::domain::errors::{ScorecardError, ScorecardResult};

/// Highest score a scorecard may carry.
pub const MAX_SCORE: u32 = 100;

/// Trust score for one `(subject, metric)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    pub id: RecordId,
    /// Usually an address; compared against approval signers after normalization.
    pub subject: String,
    pub metric: String,
    pub score: u32,
    pub weight: u32,
    pub evidence_uri: String,
    pub updated_by: String,
}

impl Scorecard {
    pub fn new(subject: impl Into<String>, metric: impl Into<String>, score: u32) -> Self {
        Self {
            id: UNASSIGNED_ID,
            subject: subject.into(),
            metric: metric.into(),
            score,
            weight: 1,
            evidence_uri: String::new(),
            updated_by: String::new(),
        }
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_evidence(mut self, uri: impl Into<String>) -> Self {
        self.evidence_uri = uri.into();
        self
    }

    pub fn with_updated_by(mut self, updater: impl Into<String>) -> Self {
        self.updated_by = updater.into();
        self
    }

    /// Field checks that do not depend on the id.
    pub fn validate_fields(&self, addresses: &dyn AddressValidator) -> ScorecardResult<()> {
        if is_blank(&self.subject) {
            return Err(ScorecardError::validation("subject is required"));
        }
        if is_blank(&self.metric) {
            return Err(ScorecardError::validation("metric is required"));
        }
        if self.score > MAX_SCORE {
            return Err(ScorecardError::validation(format!(
                "score must be between 0 and {MAX_SCORE}, got {}",
                self.score
            )));
        }
        if self.weight == 0 {
            return Err(ScorecardError::validation("weight must be positive"));
        }
        if is_blank(&self.updated_by) {
            return Err(ScorecardError::validation("updated_by is required"));
        }
        addresses
            .validate(&self.updated_by)
            .map_err(|source| ScorecardError::InvalidAddress {
                field: "updated_by",
                source,
            })
    }

    /// Full check for a persisted scorecard.
    pub fn validate_basic(&self, addresses: &dyn AddressValidator) -> ScorecardResult<()> {
        if self.id == UNASSIGNED_ID {
            return Err(ScorecardError::validation("scorecard id must be set"));
        }
        self.validate_fields(addresses)
    }
}

impl Record for Scorecard {
    const KIND: &'static str = "scorecard";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

impl IndexedRecord for Scorecard {
    fn index_key(&self) -> CompositeKey {
        CompositeKey::new(&self.subject, &self.metric)
    }
}
