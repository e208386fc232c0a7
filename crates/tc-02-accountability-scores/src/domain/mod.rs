pub mod entities;
pub mod errors;

pub use entities::{Scorecard, MAX_SCORE};
pub use errors::{ScorecardError, ScorecardResult};
