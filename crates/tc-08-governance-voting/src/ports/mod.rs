pub mod inbound;

pub use inbound::GovernanceVotingApi;
