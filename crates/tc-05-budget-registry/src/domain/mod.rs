pub mod entities;
pub mod errors;

pub use entities::{Budget, BudgetStatus};
pub use errors::{BudgetError, BudgetResult};
