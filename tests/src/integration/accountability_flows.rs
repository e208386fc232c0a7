//! # Accountability Flows
//!
//! Budget → procurement → disbursement, each gated by approvals backed by
//! scorecards, driven through `KeeperContainer` so every collaborator port is
//! served by a real keeper.
//!
//! ## Flow Tested
//!
//! 1. Budget legislated with Audit (94) and Controller (91) approvals
//! 2. Procurement registered against the budget
//! 3. Disbursements capped by the procurement amount
//! 4. Approvals rejected when the scorecard belongs to someone else
//! 5. Release blocked until the second approval arrives

#[cfg(test)]
mod tests {
    use crate::fixtures::{
        budget, disbursement, php, procurement, seat_official, seat_officials, world,
        CONTRACT_URI,
    };
    use shared_types::test_utils::derive_address;
    use shared_types::{ErrorKind, RecordId};
    use std::ops::ControlFlow;
    use tc_02_accountability_scores::{AccountabilityScoresApi, Scorecard};
    use tc_03_approval_quorum::Approval;
    use tc_05_budget_registry::{BudgetRegistryApi, BudgetStatus};
    use tc_06_procurement_ledger::{ProcurementLedgerApi, ProcurementStatus};
    use tc_07_disbursement_tracker::{DisbursementStatus, DisbursementTrackerApi};

    // =========================================================================
    // SCENARIO 1: BUDGET LEGISLATION
    // =========================================================================

    #[test]
    fn test_budget_legislated_with_quorum_then_cannot_return_to_draft() {
        let mut world = world();
        let (auditor, controller) = seat_officials(&mut world).unwrap();

        let id = world.budgets.register_budget(budget(50_000_000)).unwrap();
        assert_eq!(world.budgets.get_budget(id).unwrap().status, BudgetStatus::Draft);

        world
            .record_budget_approval(id, auditor.approval(), CONTRACT_URI)
            .unwrap();
        let with_both = world
            .record_budget_approval(id, controller.approval(), "")
            .unwrap();
        assert_eq!(with_both.approvals.len(), 2);
        assert_eq!(with_both.liability_contract_uri, CONTRACT_URI);

        let legislated = world.update_budget_status(id, BudgetStatus::Legislated).unwrap();
        assert_eq!(legislated.status, BudgetStatus::Legislated);

        let err = world.update_budget_status(id, BudgetStatus::Draft).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTransition);
        assert_eq!(
            world.budgets.get_budget(id).unwrap().status,
            BudgetStatus::Legislated
        );
    }

    #[test]
    fn test_quorum_is_rechecked_when_a_score_drops() {
        let mut world = world();
        let (auditor, controller) = seat_officials(&mut world).unwrap();
        let id = world.budgets.register_budget(budget(1_000)).unwrap();
        world
            .record_budget_approval(id, auditor.approval(), CONTRACT_URI)
            .unwrap();
        world
            .record_budget_approval(id, controller.approval(), "")
            .unwrap();

        // the auditor's standing drops after approving
        world
            .scorecards
            .upsert_scorecard(
                Scorecard::new(&auditor.address, "audit", 70)
                    .with_updated_by(derive_address("commission-on-audit")),
            )
            .unwrap();

        let err = world
            .update_budget_status(id, BudgetStatus::Legislated)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ApprovalScoreBelowThreshold);
        assert_eq!(world.budgets.get_budget(id).unwrap().status, BudgetStatus::Draft);
    }

    #[test]
    fn test_approvals_replace_on_role_or_signer_conflict() {
        let mut world = world();
        let (auditor, controller) = seat_officials(&mut world).unwrap();
        let rival = seat_official(&mut world, "rival-auditor", "Audit", 85).unwrap();
        let id = world.budgets.register_budget(budget(1_000)).unwrap();

        world
            .record_budget_approval(id, auditor.approval(), CONTRACT_URI)
            .unwrap();
        world
            .record_budget_approval(id, controller.approval(), "")
            .unwrap();

        // same signer, role spelled differently: replaces their own entry
        let mut again = auditor.approval();
        again.role = " AUDIT ".to_string();
        let budget = world.record_budget_approval(id, again, "").unwrap();
        assert_eq!(budget.approvals.len(), 2);

        // a different signer claiming the same role displaces the auditor
        let budget = world.record_budget_approval(id, rival.approval(), "").unwrap();
        let signers: Vec<_> = budget.approvals.iter().map(|a| a.signer.clone()).collect();
        assert_eq!(signers, vec![controller.address.clone(), rival.address.clone()]);
    }

    // =========================================================================
    // SCENARIO 2: PROCUREMENT LINKAGE
    // =========================================================================

    #[test]
    fn test_procurement_requires_existing_budget() {
        let mut world = world();

        let err = world
            .register_procurement(procurement(1, 12_500_000))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BudgetMissing);

        let budget_id = world.budgets.register_budget(budget(50_000_000)).unwrap();
        let id = world
            .register_procurement(procurement(budget_id, 12_500_000))
            .unwrap();

        // the rejected registration did not consume an id
        assert_eq!(id, 1);
        let stored = world.procurements.get_procurement(id).unwrap();
        assert_eq!(stored.status, ProcurementStatus::Planning);
        assert_eq!(stored.amount, php(12_500_000));
        assert_eq!(stored.budget_id, budget_id);
    }

    #[test]
    fn test_procurement_awarded_after_quorum() {
        let mut world = world();
        let (auditor, controller) = seat_officials(&mut world).unwrap();
        let budget_id = world.budgets.register_budget(budget(50_000_000)).unwrap();
        let id = world
            .register_procurement(procurement(budget_id, 12_500_000))
            .unwrap();

        world
            .record_procurement_approval(id, auditor.approval(), CONTRACT_URI)
            .unwrap();
        world
            .update_procurement_status(id, ProcurementStatus::Tendering)
            .unwrap();

        let err = world
            .update_procurement_status(id, ProcurementStatus::Awarded)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ApprovalThreshold);

        world
            .record_procurement_approval(id, controller.approval(), "")
            .unwrap();
        let awarded = world
            .update_procurement_status(id, ProcurementStatus::Awarded)
            .unwrap();
        assert_eq!(awarded.status, ProcurementStatus::Awarded);

        let err = world
            .update_procurement_status(id, ProcurementStatus::Completed)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTransition);
    }

    // =========================================================================
    // SCENARIO 3: DISBURSEMENT CAP
    // =========================================================================

    fn funded_procurement(world: &mut node_runtime::KeeperContainer) -> RecordId {
        let budget_id = world.budgets.register_budget(budget(50_000_000)).unwrap();
        world
            .register_procurement(procurement(budget_id, 12_500_000))
            .unwrap()
    }

    #[test]
    fn test_disbursements_capped_by_procurement_amount() {
        let mut world = world();
        let procurement_id = funded_procurement(&mut world);

        let first = world
            .register_disbursement(disbursement(procurement_id, 6_000_000))
            .unwrap();
        assert_eq!(
            world.disbursements.get_disbursed_total(procurement_id).unwrap(),
            php(6_000_000)
        );

        let err = world
            .register_disbursement(disbursement(procurement_id, 7_000_000))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AmountExceeded);
        assert_eq!(
            world.disbursements.get_disbursed_total(procurement_id).unwrap(),
            php(6_000_000)
        );

        // exactly reaching the cap is allowed, and ids continue without a gap
        let second = world
            .register_disbursement(disbursement(procurement_id, 6_500_000))
            .unwrap();
        assert_eq!(second, first + 1);
        assert_eq!(
            world.disbursements.get_disbursed_total(procurement_id).unwrap(),
            php(12_500_000)
        );
        world.verify().unwrap();
    }

    #[test]
    fn test_disbursement_requires_existing_procurement() {
        let mut world = world();
        let err = world
            .register_disbursement(disbursement(42, 1))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ProcurementMissing);
        assert_eq!(world.disbursements.get_disbursed_total(42).unwrap(), php(0));
    }

    // =========================================================================
    // SCENARIO 4: SCORECARD MISMATCH
    // =========================================================================

    #[test]
    fn test_approval_backed_by_someone_elses_scorecard_is_rejected() {
        let mut world = world();
        let (auditor, controller) = seat_officials(&mut world).unwrap();
        let id = world.budgets.register_budget(budget(1_000)).unwrap();
        world
            .record_budget_approval(id, auditor.approval(), CONTRACT_URI)
            .unwrap();

        // controller signs but cites the auditor's scorecard
        let borrowed = Approval::new(
            &controller.address,
            controller.role,
            auditor.scorecard_id,
            "ipfs://signatures/controller",
        );
        let err = world.record_budget_approval(id, borrowed, "").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ApprovalScoreMismatch);

        let stored = world.budgets.get_budget(id).unwrap();
        assert_eq!(stored.approvals, vec![auditor.approval()]);
    }

    #[test]
    fn test_approval_with_unknown_scorecard_is_rejected() {
        let mut world = world();
        let (auditor, _) = seat_officials(&mut world).unwrap();
        let id = world.budgets.register_budget(budget(1_000)).unwrap();

        let mut approval = auditor.approval();
        approval.scorecard_id = 99;
        let err = world
            .record_budget_approval(id, approval, CONTRACT_URI)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ApprovalScoreLookupFailed);
        let stored = world.budgets.get_budget(id).unwrap();
        assert!(stored.approvals.is_empty());
        assert!(stored.liability_contract_uri.is_empty());
    }

    // =========================================================================
    // SCENARIO 5: RELEASE THRESHOLD
    // =========================================================================

    #[test]
    fn test_release_needs_two_approvals() {
        let mut world = world();
        let (auditor, controller) = seat_officials(&mut world).unwrap();
        let procurement_id = funded_procurement(&mut world);
        let id = world
            .register_disbursement(disbursement(procurement_id, 6_000_000))
            .unwrap();

        world
            .record_disbursement_approval(id, auditor.approval(), CONTRACT_URI)
            .unwrap();
        let err = world
            .update_disbursement_status(id, DisbursementStatus::Released)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ApprovalThreshold);
        assert_eq!(
            world.disbursements.get_disbursement(id).unwrap().status,
            DisbursementStatus::Scheduled
        );

        world
            .record_disbursement_approval(id, controller.approval(), "")
            .unwrap();
        let released = world
            .update_disbursement_status(id, DisbursementStatus::Released)
            .unwrap();
        assert_eq!(released.status, DisbursementStatus::Released);

        // same status again is a no-op
        let unchanged = world
            .update_disbursement_status(id, DisbursementStatus::Released)
            .unwrap();
        assert_eq!(unchanged, released);
    }

    // =========================================================================
    // PROPERTIES
    // =========================================================================

    #[test]
    fn test_ids_increase_and_walk_in_id_order() {
        let mut world = world();
        let ids: Vec<RecordId> = (1..=5)
            .map(|n| world.budgets.register_budget(budget(n * 1_000)).unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);

        let mut walked = Vec::new();
        world
            .budgets
            .walk_budgets(&mut |b| {
                walked.push(b.id);
                if walked.len() == 3 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
            .unwrap();
        assert_eq!(walked, vec![1, 2, 3]);
    }
}
