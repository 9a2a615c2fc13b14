//! Terminal artifact of a debate.

use super::position::ConsensusVote;
use super::round::Round;
use crate::agent::AgentId;
use serde::{Deserialize, Serialize};

/// How the debate reached (or failed to reach) its conclusion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "path", rename_all = "snake_case")]
pub enum DecisionPath {
    /// A round's largest stance group met the consensus threshold
    EarlyConsensus { round: usize },
    /// No early agreement; the final evaluation vote met the threshold
    FinalVote,
    /// The final evaluation vote did not meet the threshold
    NoConsensus,
    /// A round finished without a single response
    NoQuorum { round: usize },
}

impl std::fmt::Display for DecisionPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecisionPath::EarlyConsensus { round } => write!(f, "early_consensus(round {round})"),
            DecisionPath::FinalVote => write!(f, "final_vote"),
            DecisionPath::NoConsensus => write!(f, "no_consensus"),
            DecisionPath::NoQuorum { round } => write!(f, "no_quorum(round {round})"),
        }
    }
}

/// Result of one debate coordinator run.
///
/// Always well-formed: a failed debate has `consensus_stance = None`,
/// zero confidence and a dissent list a caller can still render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateOutcome {
    pub topic: String,
    pub participants: Vec<AgentId>,
    pub rounds: Vec<Round>,
    pub consensus_stance: Option<String>,
    pub dissent: Vec<String>,
    pub decision_path: DecisionPath,
    pub confidence: f64,
    /// Final evaluation votes, empty unless the final vote ran
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub votes: Vec<ConsensusVote>,
}

impl DebateOutcome {
    pub fn reached_consensus(&self) -> bool {
        self.consensus_stance.is_some()
    }

    pub fn rounds_run(&self) -> usize {
        self.rounds.len()
    }

    pub fn final_round(&self) -> Option<&Round> {
        self.rounds.last()
    }

    pub fn is_no_quorum(&self) -> bool {
        matches!(self.decision_path, DecisionPath::NoQuorum { .. })
    }
}
