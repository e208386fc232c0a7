pub mod inbound;
pub mod outbound;

pub use inbound::DisbursementTrackerApi;
pub use outbound::ProcurementProvider;
