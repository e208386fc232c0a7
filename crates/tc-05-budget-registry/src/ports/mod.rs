pub mod inbound;

pub use inbound::BudgetRegistryApi;
