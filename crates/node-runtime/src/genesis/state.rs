//! # Application Genesis
//!
//! One JSON document holding the exported state of every keeper:
//!
//! ```json
//! {
//!   "scorecards":    { "records": [...], "count": 2 },
//!   "budgets":       { "records": [...], "count": 1 },
//!   "procurements":  { "records": [...], "count": 1 },
//!   "disbursements": { "records": [...], "count": 1, "totals": [...] },
//!   "delegations":   { "records": [],    "count": 0 }
//! }
//! ```
//!
//! Missing sections default to empty.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tc_01_record_store::GenesisState;
use tc_02_accountability_scores::Scorecard;
use tc_05_budget_registry::Budget;
use tc_06_procurement_ledger::Procurement;
use tc_07_disbursement_tracker::DisbursementGenesis;
use tc_08_governance_voting::Delegation;
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppGenesis {
    pub scorecards: GenesisState<Scorecard>,
    pub budgets: GenesisState<Budget>,
    pub procurements: GenesisState<Procurement>,
    pub disbursements: DisbursementGenesis,
    pub delegations: GenesisState<Delegation>,
}

#[derive(Debug, Error)]
pub enum GenesisFileError {
    #[error("cannot access genesis file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed genesis file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl AppGenesis {
    pub fn load(path: &Path) -> Result<Self, GenesisFileError> {
        let bytes = std::fs::read(path).map_err(|source| GenesisFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| GenesisFileError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), GenesisFileError> {
        let json = serde_json::to_vec_pretty(self).map_err(|source| GenesisFileError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| GenesisFileError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Records across every kind.
    pub fn record_count(&self) -> usize {
        self.scorecards.records.len()
            + self.budgets.records.len()
            + self.procurements.records.len()
            + self.disbursements.records.len()
            + self.delegations.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
            && self.scorecards.count == 0
            && self.budgets.count == 0
            && self.procurements.count == 0
            && self.disbursements.count == 0
            && self.delegations.count == 0
    }
}
