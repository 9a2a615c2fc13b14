//! Audit record of a collaborative decision.

use crate::agent::AgentId;
use crate::consensus::{ConsensusBuilder, ConsensusResult};
use crate::deliberation::Position;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Candidates gathered from participants for one topic.
///
/// Collection does not score anything; [`evaluate`](Self::evaluate) hands
/// the candidates to a [`ConsensusBuilder`] when a decision is needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollaborativeDecision {
    pub id: Uuid,
    pub initiator: AgentId,
    pub topic: String,
    pub participants: Vec<AgentId>,
    pub candidates: Vec<Position>,
    pub absent: Vec<AgentId>,
    pub timestamp: DateTime<Utc>,
}

impl CollaborativeDecision {
    pub fn new(
        initiator: AgentId,
        topic: impl Into<String>,
        participants: Vec<AgentId>,
        candidates: Vec<Position>,
        absent: Vec<AgentId>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            initiator,
            topic: topic.into(),
            participants,
            candidates,
            absent,
            timestamp: Utc::now(),
        }
    }

    pub fn evaluate(&self, builder: &ConsensusBuilder) -> ConsensusResult {
        builder.build(&self.candidates, &self.participants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_counts_absent_as_opposition() {
        let participants = vec![AgentId::new("a"), AgentId::new("b"), AgentId::new("c")];
        let decision = CollaborativeDecision::new(
            AgentId::new("a"),
            "refund policy",
            participants,
            vec![Position::new("a", "refund", 0.8), Position::new("b", "refund", 0.6)],
            vec![AgentId::new("c")],
        );
        let result = decision.evaluate(&ConsensusBuilder::new());
        let selected = result.selected.unwrap();
        assert_eq!(selected.opposing_agents, vec![AgentId::new("c")]);
        assert!(result.reached);
    }
}
