//! Consensus options derived from grouped positions.

use crate::agent::AgentId;
use serde::{Deserialize, Serialize};

/// A candidate decision, built from every position sharing one stance.
///
/// `supporting_agents` and `opposing_agents` partition the participant set:
/// an agent that is not a supporter (including one that never answered)
/// counts as opposing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusOption {
    pub id: String,
    pub description: String,
    pub supporting_agents: Vec<AgentId>,
    pub opposing_agents: Vec<AgentId>,
    pub evidence: Vec<String>,
    pub risks: Vec<String>,
    pub benefits: Vec<String>,
    pub confidence: f64,
}

impl ConsensusOption {
    pub fn total_agents(&self) -> usize {
        self.supporting_agents.len() + self.opposing_agents.len()
    }

    /// Share of participants supporting this option, `0.0` with no participants
    pub fn support_ratio(&self) -> f64 {
        let total = self.total_agents();
        if total == 0 {
            0.0
        } else {
            self.supporting_agents.len() as f64 / total as f64
        }
    }

    pub fn is_supported_by(&self, agent: &AgentId) -> bool {
        self.supporting_agents.contains(agent)
    }
}

/// Result of a consensus build.
///
/// Not reaching the bar is a normal outcome (`reached = false`), not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusResult {
    pub reached: bool,
    pub selected: Option<ConsensusOption>,
    /// Every option not selected, best first
    pub alternatives: Vec<ConsensusOption>,
    pub total_agents: usize,
    pub minimum_support: f64,
}

impl ConsensusResult {
    /// All options in ranked order, the selected one first
    pub fn ranked(&self) -> impl Iterator<Item = &ConsensusOption> {
        self.selected.iter().chain(self.alternatives.iter())
    }
}
