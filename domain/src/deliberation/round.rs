//! A single synchronized wave of position gathering.

use super::position::Position;
use crate::agent::AgentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One debate round.
///
/// `positions` keeps the order in which responses completed; callers that
/// need a stable order should sort by agent id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    /// Round number (1-indexed)
    pub index: usize,
    pub positions: Vec<Position>,
    /// Participants that failed to answer this round
    pub absent: Vec<AgentId>,
    pub timestamp: DateTime<Utc>,
}

impl Round {
    pub fn new(index: usize, positions: Vec<Position>, absent: Vec<AgentId>) -> Self {
        Self {
            index,
            positions,
            absent,
            timestamp: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Positions sorted by agent id, for deterministic comparisons
    pub fn sorted_positions(&self) -> Vec<&Position> {
        let mut sorted: Vec<&Position> = self.positions.iter().collect();
        sorted.sort_by(|a, b| a.agent.cmp(&b.agent));
        sorted
    }

    pub fn position_of(&self, agent: &AgentId) -> Option<&Position> {
        self.positions.iter().find(|p| &p.agent == agent)
    }
}
