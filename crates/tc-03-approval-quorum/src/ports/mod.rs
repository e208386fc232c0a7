pub mod inbound;
pub mod outbound;

pub use inbound::ApprovalQuorumApi;
pub use outbound::ScorecardReader;
