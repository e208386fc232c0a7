//! Shared actors and records for the flows and benchmarks.

use node_runtime::{KeeperContainer, RuntimeConfig};
use shared_types::test_utils::derive_address;
use shared_types::{Amount, RecordId};
use tc_02_accountability_scores::{AccountabilityScoresApi, Scorecard, ScorecardResult};
use tc_03_approval_quorum::Approval;
use tc_05_budget_registry::Budget;
use tc_06_procurement_ledger::Procurement;
use tc_07_disbursement_tracker::Disbursement;

pub const AGENCY: &str = "Department of Public Works";
pub const CONTRACT_URI: &str = "ipfs://liability/flood-control-2025";

/// An approver with a scorecard on file.
#[derive(Debug, Clone)]
pub struct Official {
    pub address: String,
    pub role: &'static str,
    pub scorecard_id: RecordId,
}

impl Official {
    pub fn approval(&self) -> Approval {
        Approval::new(
            &self.address,
            self.role,
            self.scorecard_id,
            format!("ipfs://signatures/{}", self.role.to_lowercase()),
        )
    }
}

/// In-memory container with the default quorum.
pub fn world() -> KeeperContainer {
    match KeeperContainer::new(RuntimeConfig::default()) {
        Ok(world) => world,
        Err(e) => panic!("default configuration must be valid: {e}"),
    }
}

/// Register an official's scorecard and return them.
pub fn seat_official(
    world: &mut KeeperContainer,
    seed: &str,
    role: &'static str,
    score: u32,
) -> ScorecardResult<Official> {
    let address = derive_address(seed);
    let card = Scorecard::new(&address, role.to_lowercase(), score)
        .with_evidence(format!("ipfs://evidence/{seed}"))
        .with_updated_by(derive_address("commission-on-audit"));
    let scorecard_id = world.scorecards.upsert_scorecard(card)?;
    Ok(Official {
        address,
        role,
        scorecard_id,
    })
}

/// The auditor (94) and controller (91) used by most flows.
pub fn seat_officials(world: &mut KeeperContainer) -> ScorecardResult<(Official, Official)> {
    Ok((
        seat_official(world, "auditor", "Audit", 94)?,
        seat_official(world, "controller", "Controller", 91)?,
    ))
}

pub fn php(amount: u64) -> Amount {
    Amount::from(amount)
}

pub fn budget(amount: u64) -> Budget {
    Budget::new(
        AGENCY,
        "2025",
        "Flood control program",
        php(amount),
        "php",
        derive_address("budget-officer"),
    )
}

pub fn procurement(budget_id: RecordId, amount: u64) -> Procurement {
    Procurement::new(
        budget_id,
        "DPWH-2025-0042",
        AGENCY,
        "Pumping station rehabilitation",
        php(amount),
        "php",
        derive_address("procurement-officer"),
    )
    .with_category("infrastructure")
    .with_supplier("Acme Builders")
}

pub fn disbursement(procurement_id: RecordId, amount: u64) -> Disbursement {
    Disbursement::new(procurement_id, php(amount), "php", derive_address("treasurer"))
        .with_evidence("ipfs://evidence/invoice")
}
