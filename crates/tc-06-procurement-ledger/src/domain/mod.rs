pub mod entities;
pub mod errors;

pub use entities::{Procurement, ProcurementStatus};
pub use errors::{ProcurementError, ProcurementResult};
