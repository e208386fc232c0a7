//! # Keeper Container
//!
//! Owns one keeper per record kind, all sharing the configured address
//! codec and quorum thresholds, and wires their cross-kind collaborators:
//! scorecards back every approval, budgets back procurements and
//! procurements back disbursements.

use crate::adapters::NodeStore;
use crate::container::config::{ConfigError, RuntimeConfig};
use crate::genesis::AppGenesis;
use shared_types::{AddressValidator, ErrorKind, RecordId};
use std::sync::Arc;
use tc_01_record_store::KVStoreError;
use tc_02_accountability_scores::{AccountabilityScoresApi, ScorecardError, ScorecardKeeper};
use tc_03_approval_quorum::{Approval, QuorumValidator};
use tc_05_budget_registry::{Budget, BudgetError, BudgetKeeper, BudgetRegistryApi, BudgetStatus};
use tc_06_procurement_ledger::{
    Procurement, ProcurementError, ProcurementKeeper, ProcurementLedgerApi, ProcurementResult,
    ProcurementStatus,
};
use tc_07_disbursement_tracker::{
    Disbursement, DisbursementError, DisbursementKeeper, DisbursementResult, DisbursementStatus,
    DisbursementTrackerApi,
};
use tc_08_governance_voting::{DelegationError, DelegationKeeper, GovernanceVotingApi};
use thiserror::Error;
use tracing::{info, warn};

/// Store names, one file each under the data directory.
pub mod stores {
    pub const SCORECARDS: &str = "scorecards";
    pub const BUDGETS: &str = "budgets";
    pub const PROCUREMENTS: &str = "procurements";
    pub const DISBURSEMENTS: &str = "disbursements";
    pub const DELEGATIONS: &str = "delegations";
}

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("storage unavailable: {0}")]
    Storage(#[from] KVStoreError),

    #[error("scorecards: {0}")]
    Scorecards(#[from] ScorecardError),

    #[error("budgets: {0}")]
    Budgets(#[from] BudgetError),

    #[error("procurements: {0}")]
    Procurements(#[from] ProcurementError),

    #[error("disbursements: {0}")]
    Disbursements(#[from] DisbursementError),

    #[error("delegations: {0}")]
    Delegations(#[from] DelegationError),
}

impl ContainerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContainerError::Config(_) => ErrorKind::ValidationError,
            ContainerError::Storage(_) => ErrorKind::Storage,
            ContainerError::Scorecards(e) => e.kind(),
            ContainerError::Budgets(e) => e.kind(),
            ContainerError::Procurements(e) => e.kind(),
            ContainerError::Disbursements(e) => e.kind(),
            ContainerError::Delegations(e) => e.kind(),
        }
    }
}

pub type ContainerResult<T> = Result<T, ContainerError>;

pub struct KeeperContainer {
    config: RuntimeConfig,
    pub scorecards: ScorecardKeeper<NodeStore>,
    pub budgets: BudgetKeeper<NodeStore>,
    pub procurements: ProcurementKeeper<NodeStore>,
    pub disbursements: DisbursementKeeper<NodeStore>,
    pub delegations: DelegationKeeper<NodeStore>,
}

impl KeeperContainer {
    /// Validate `config` and open every store.
    pub fn new(config: RuntimeConfig) -> ContainerResult<Self> {
        config.validate()?;

        let addresses: Arc<dyn AddressValidator> = Arc::new(config.addresses.codec());
        let quorum = QuorumValidator::new(config.quorum.clone(), Arc::clone(&addresses));
        let dir = config.storage.data_dir.as_deref();

        let container = Self {
            scorecards: ScorecardKeeper::new(
                NodeStore::open(dir, stores::SCORECARDS)?,
                Arc::clone(&addresses),
            ),
            budgets: BudgetKeeper::new(NodeStore::open(dir, stores::BUDGETS)?, quorum.clone()),
            procurements: ProcurementKeeper::new(
                NodeStore::open(dir, stores::PROCUREMENTS)?,
                quorum.clone(),
            ),
            disbursements: DisbursementKeeper::new(
                NodeStore::open(dir, stores::DISBURSEMENTS)?,
                quorum,
            ),
            delegations: DelegationKeeper::new(
                NodeStore::open(dir, stores::DELEGATIONS)?,
                addresses,
            ),
            config,
        };

        info!(
            "[runtime] 📦 Keepers ready ({}, quorum {} approvals / score {})",
            if container.config.storage.data_dir.is_some() {
                "file-backed"
            } else {
                "in-memory"
            },
            container.config.quorum.min_approvals,
            container.config.quorum.min_score
        );
        Ok(container)
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    // ---- budgets ------------------------------------------------------------

    pub fn update_budget_status(
        &mut self,
        id: RecordId,
        next: BudgetStatus,
    ) -> Result<Budget, BudgetError> {
        self.budgets.update_budget_status(id, next, &self.scorecards)
    }

    pub fn record_budget_approval(
        &mut self,
        id: RecordId,
        approval: Approval,
        contract_uri: &str,
    ) -> Result<Budget, BudgetError> {
        self.budgets
            .record_budget_approval(id, approval, contract_uri, &self.scorecards)
    }

    // ---- procurements -------------------------------------------------------

    pub fn register_procurement(&mut self, procurement: Procurement) -> ProcurementResult<RecordId> {
        self.procurements
            .register_procurement(procurement, &self.budgets)
    }

    pub fn update_procurement_status(
        &mut self,
        id: RecordId,
        next: ProcurementStatus,
    ) -> ProcurementResult<Procurement> {
        self.procurements
            .update_procurement_status(id, next, &self.scorecards)
    }

    pub fn record_procurement_approval(
        &mut self,
        id: RecordId,
        approval: Approval,
        contract_uri: &str,
    ) -> ProcurementResult<Procurement> {
        self.procurements
            .record_procurement_approval(id, approval, contract_uri, &self.scorecards)
    }

    // ---- disbursements ------------------------------------------------------

    pub fn register_disbursement(
        &mut self,
        disbursement: Disbursement,
    ) -> DisbursementResult<RecordId> {
        self.disbursements
            .register_disbursement(disbursement, &self.procurements)
    }

    pub fn update_disbursement_status(
        &mut self,
        id: RecordId,
        next: DisbursementStatus,
    ) -> DisbursementResult<Disbursement> {
        self.disbursements
            .update_disbursement_status(id, next, &self.scorecards)
    }

    pub fn record_disbursement_approval(
        &mut self,
        id: RecordId,
        approval: Approval,
        contract_uri: &str,
    ) -> DisbursementResult<Disbursement> {
        self.disbursements
            .record_disbursement_approval(id, approval, contract_uri, &self.scorecards)
    }

    // ---- genesis ------------------------------------------------------------

    pub fn export_genesis(&self) -> ContainerResult<AppGenesis> {
        Ok(AppGenesis {
            scorecards: self.scorecards.export_genesis()?,
            budgets: self.budgets.export_genesis()?,
            procurements: self.procurements.export_genesis()?,
            disbursements: self.disbursements.export_genesis()?,
            delegations: self.delegations.export_genesis()?,
        })
    }

    /// Import every kind, or nothing.
    ///
    /// The document is first imported into a scratch in-memory container,
    /// so a bad section is reported before any live store is written.
    pub fn import_genesis(&mut self, genesis: AppGenesis) -> ContainerResult<()> {
        let mut scratch = KeeperContainer::new(self.config.in_memory())?;
        if let Err(e) = scratch.import_sections(genesis.clone()) {
            warn!("[runtime] ❌ Genesis rejected: {}", e);
            return Err(e);
        }

        let records = genesis.record_count();
        self.import_sections(genesis)?;
        info!("[runtime] 🌱 Genesis imported ({} records)", records);
        Ok(())
    }

    fn import_sections(&mut self, genesis: AppGenesis) -> ContainerResult<()> {
        self.scorecards.import_genesis(genesis.scorecards)?;
        self.budgets.import_genesis(genesis.budgets)?;
        self.procurements.import_genesis(genesis.procurements)?;
        self.disbursements.import_genesis(genesis.disbursements)?;
        self.delegations.import_genesis(genesis.delegations)?;
        Ok(())
    }

    /// True when no keeper holds a record or has allocated an id.
    pub fn is_empty(&self) -> ContainerResult<bool> {
        Ok(self.export_genesis()?.is_empty())
    }

    /// Re-derive disbursed totals and compare them with the stored ones.
    pub fn verify(&self) -> ContainerResult<()> {
        self.disbursements.verify_disbursed_totals()?;
        Ok(())
    }
}
