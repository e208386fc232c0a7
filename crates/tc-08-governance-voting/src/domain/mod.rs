pub mod entities;
pub mod errors;

pub use entities::Delegation;
pub use errors::{DelegationError, DelegationResult};
