//! Phases of a deliberation.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Independent analyses run in parallel
    Analysis,
    /// Optional debate when the independent analyses disagree
    Debate,
    /// Resolution design from all analyses
    Solution,
    /// Follow-up and prevention planning from the resolution
    FollowUp,
    /// Merge of every phase into one recommendation
    Synthesis,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Analysis => "analysis",
            Phase::Debate => "debate",
            Phase::Solution => "solution",
            Phase::FollowUp => "follow_up",
            Phase::Synthesis => "synthesis",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Phase::Analysis => "Independent Analysis",
            Phase::Debate => "Debate",
            Phase::Solution => "Solution Design",
            Phase::FollowUp => "Proactive Follow-up",
            Phase::Synthesis => "Synthesis",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
