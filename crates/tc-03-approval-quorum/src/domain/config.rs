use serde::{Deserialize, Serialize};

/// Quorum thresholds shared by every approvable kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuorumConfig {
    /// Approvals required before a gated transition.
    pub min_approvals: usize,
    /// Lowest backing score an approval may carry.
    pub min_score: u32,
}

impl Default for QuorumConfig {
    fn default() -> Self {
        Self {
            min_approvals: 2,
            min_score: 80,
        }
    }
}

impl QuorumConfig {
    pub fn with_min_approvals(mut self, min_approvals: usize) -> Self {
        self.min_approvals = min_approvals;
        self
    }

    pub fn with_min_score(mut self, min_score: u32) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.min_approvals == 0 {
            return Err("min_approvals must be at least 1".to_string());
        }
        if self.min_score > tc_02_accountability_scores::MAX_SCORE {
            return Err(format!(
                "min_score must not exceed {}",
                tc_02_accountability_scores::MAX_SCORE
            ));
        }
        Ok(())
    }
}
