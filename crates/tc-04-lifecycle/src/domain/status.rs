//! Traits a record kind implements to get a lifecycle.

use std::fmt::{Debug, Display};
use tc_03_approval_quorum::Approvable;

/// A status graph.
///
/// Implementors list, per status, the statuses it may move to and which
/// targets need a quorum first.
pub trait LifecycleStatus: Copy + Eq + Debug + Display + 'static {
    /// Status every record of this kind starts in.
    fn initial() -> Self;

    /// Adjacent statuses; empty for terminal ones.
    fn allowed_transitions(&self) -> &'static [Self];

    /// True if entering `self` requires `ensure_quorum` to pass.
    fn requires_quorum(&self) -> bool;

    fn can_transition_to(&self, next: Self) -> bool {
        self.allowed_transitions().contains(&next)
    }

    fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }

    fn is_initial(&self) -> bool {
        *self == Self::initial()
    }
}

/// A record that moves through a `LifecycleStatus` graph.
pub trait LifecycleRecord: Approvable {
    type Status: LifecycleStatus;

    fn status(&self) -> Self::Status;

    fn set_status(&mut self, status: Self::Status);
}
