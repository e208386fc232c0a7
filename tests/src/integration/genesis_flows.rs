//! # Genesis Flows
//!
//! Whole-state export from one node and import into another, through the
//! JSON genesis document and file-backed stores.

#[cfg(test)]
mod tests {
    use crate::fixtures::{
        budget, disbursement, php, procurement, seat_officials, world, CONTRACT_URI,
    };
    use node_runtime::{AppGenesis, KeeperContainer, RuntimeConfig};
    use shared_types::test_utils::derive_address;
    use shared_types::ErrorKind;
    use tc_05_budget_registry::{BudgetRegistryApi, BudgetStatus};
    use tc_07_disbursement_tracker::DisbursementTrackerApi;
    use tc_08_governance_voting::{Delegation, GovernanceVotingApi};

    /// A node with one record of every kind and a legislated budget.
    fn populated() -> KeeperContainer {
        let mut world = world();
        let (auditor, controller) = seat_officials(&mut world).unwrap();

        let budget_id = world.budgets.register_budget(budget(50_000_000)).unwrap();
        world
            .record_budget_approval(budget_id, auditor.approval(), CONTRACT_URI)
            .unwrap();
        world
            .record_budget_approval(budget_id, controller.approval(), "")
            .unwrap();
        world
            .update_budget_status(budget_id, BudgetStatus::Legislated)
            .unwrap();

        let procurement_id = world
            .register_procurement(procurement(budget_id, 12_500_000))
            .unwrap();
        world
            .register_disbursement(disbursement(procurement_id, 6_000_000))
            .unwrap();
        world
            .register_disbursement(disbursement(procurement_id, 1_500_000))
            .unwrap();

        world
            .delegations
            .register_delegation(Delegation::new(
                derive_address("auditor"),
                derive_address("deputy-auditor"),
                "budget",
            ))
            .unwrap();
        world
    }

    #[test]
    fn test_export_import_preserves_state_order_and_counters() {
        let source = populated();
        let exported = source.export_genesis().unwrap();
        assert_eq!(exported.record_count(), 7);
        assert_eq!(exported.disbursements.totals.len(), 1);
        assert_eq!(exported.disbursements.totals[0].total, php(7_500_000));

        let json = serde_json::to_string_pretty(&exported).unwrap();
        let parsed: AppGenesis = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, exported);

        let dir = tempfile::tempdir().unwrap();
        let config = RuntimeConfig::default().with_data_dir(dir.path());
        {
            let mut target = KeeperContainer::new(config.clone()).unwrap();
            target.import_genesis(parsed).unwrap();
        }

        // reopen from disk
        let mut target = KeeperContainer::new(config).unwrap();
        assert_eq!(target.export_genesis().unwrap(), exported);
        target.verify().unwrap();
        assert_eq!(
            target.budgets.get_budget(1).unwrap().status,
            BudgetStatus::Legislated
        );
        assert_eq!(
            target.disbursements.get_disbursed_total(1).unwrap(),
            php(7_500_000)
        );

        // counters continue where the exporting node stopped
        assert_eq!(target.budgets.register_budget(budget(10)).unwrap(), 2);
        assert_eq!(
            target
                .register_disbursement(disbursement(1, 5_000_000))
                .unwrap(),
            3
        );
        let err = target
            .register_disbursement(disbursement(1, 1))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AmountExceeded);
    }

    #[test]
    fn test_tampered_totals_reject_the_whole_document() {
        let mut exported = populated().export_genesis().unwrap();
        exported.disbursements.totals[0].total = php(1);

        let mut target = world();
        let err = target.import_genesis(exported).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationError);
        assert!(target.is_empty().unwrap());
    }

    #[test]
    fn test_import_refuses_populated_node() {
        let exported = populated().export_genesis().unwrap();
        let mut target = populated();
        assert!(target.import_genesis(exported).is_err());
    }
}
