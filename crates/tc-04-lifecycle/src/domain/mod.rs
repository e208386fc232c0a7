pub mod errors;
pub mod status;

pub use errors::{LifecycleError, LifecycleResult};
pub use status::{LifecycleRecord, LifecycleStatus};
