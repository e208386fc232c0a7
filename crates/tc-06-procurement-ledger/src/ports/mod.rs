pub mod inbound;
pub mod outbound;

pub use inbound::ProcurementLedgerApi;
pub use outbound::BudgetProvider;
