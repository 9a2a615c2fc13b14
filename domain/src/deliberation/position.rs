//! Positions and consensus votes: what an agent says in a round.

use crate::agent::AgentId;
use crate::core::string::normalize_stance;
use serde::{Deserialize, Serialize};

/// One agent's stance for one round.
///
/// Immutable once recorded in a [`Round`](super::Round); confidence is
/// clamped to `[0, 1]` on construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub agent: AgentId,
    pub stance: String,
    pub arguments: Vec<String>,
    pub evidence: Vec<String>,
    pub confidence: f64,
}

impl Position {
    pub fn new(agent: impl Into<AgentId>, stance: impl Into<String>, confidence: f64) -> Self {
        Self {
            agent: agent.into(),
            stance: stance.into(),
            arguments: Vec::new(),
            evidence: Vec::new(),
            confidence: clamp_confidence(confidence),
        }
    }

    pub fn with_arguments<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments = arguments.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_evidence<I, S>(mut self, evidence: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.evidence = evidence.into_iter().map(Into::into).collect();
        self
    }

    /// Stance key used to decide whether two agents hold "the same" view
    pub fn stance_key(&self) -> String {
        normalize_stance(&self.stance)
    }

    /// Dissent rendering: `"{agent}: {stance}"`
    pub fn render(&self) -> String {
        format!("{}: {}", self.agent, self.stance)
    }
}

/// An agent's answer to "do these positions amount to consensus?"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusVote {
    pub agent: AgentId,
    pub agrees: bool,
    pub reason: String,
}

impl ConsensusVote {
    pub fn agree(agent: impl Into<AgentId>, reason: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            agrees: true,
            reason: reason.into(),
        }
    }

    pub fn disagree(agent: impl Into<AgentId>, reason: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            agrees: false,
            reason: reason.into(),
        }
    }

    /// Dissent rendering: `"{agent}: {reason}"`
    pub fn render(&self) -> String {
        format!("{}: {}", self.agent, self.reason)
    }
}

/// Clamp to `[0, 1]`, mapping NaN to zero.
pub fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}
