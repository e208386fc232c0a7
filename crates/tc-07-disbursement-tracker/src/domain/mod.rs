pub mod entities;
pub mod errors;
pub mod totals;

pub use entities::{DisbursedTotal, Disbursement, DisbursementGenesis, DisbursementStatus};
pub use errors::{DisbursementError, DisbursementResult};
pub use totals::sum_by_procurement;
