use crate::domain::{Delegation, DelegationResult};
use shared_types::RecordId;
use std::ops::ControlFlow;
use tc_01_record_store::GenesisState;

pub trait GovernanceVotingApi {
    /// Create or replace the delegation for a normalized `(delegator, scope)`.
    ///
    /// The stored delegation is always active, whatever the input says.
    fn register_delegation(&mut self, delegation: Delegation) -> DelegationResult<RecordId>;

    fn deactivate_delegation(&mut self, id: RecordId) -> DelegationResult<Delegation>;

    fn get_delegation(&self, id: RecordId) -> DelegationResult<Delegation>;

    fn get_delegation_by_scope(&self, delegator: &str, scope: &str)
        -> DelegationResult<Delegation>;

    fn walk_delegations(
        &self,
        visit: &mut dyn FnMut(Delegation) -> ControlFlow<()>,
    ) -> DelegationResult<()>;

    fn export_genesis(&self) -> DelegationResult<GenesisState<Delegation>>;

    fn import_genesis(&mut self, state: GenesisState<Delegation>) -> DelegationResult<()>;
}
