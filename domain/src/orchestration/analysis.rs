//! Per-agent analysis requests and results.

use super::phase::Phase;
use crate::agent::AgentId;
use crate::case::Case;
use crate::deliberation::{ParsedJudgment, Position};
use serde::{Deserialize, Serialize};

/// What an agent is asked to analyze in one phase
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub case: Case,
    pub phase: Phase,
    /// Results of earlier phases this agent depends on
    pub prior_analyses: Vec<AgentAnalysis>,
    /// Summaries of earlier cases for the same subject
    pub memories: Vec<String>,
    /// Panel conclusions reached earlier in this deliberation
    pub notes: Vec<String>,
}

impl AnalysisRequest {
    pub fn new(case: Case, phase: Phase) -> Self {
        Self {
            case,
            phase,
            prior_analyses: Vec::new(),
            memories: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn with_prior_analyses(mut self, analyses: Vec<AgentAnalysis>) -> Self {
        self.prior_analyses = analyses;
        self
    }

    pub fn with_memories(mut self, memories: Vec<String>) -> Self {
        self.memories = memories;
        self
    }

    pub fn with_notes(mut self, notes: Vec<String>) -> Self {
        self.notes = notes;
        self
    }
}

/// One agent's contribution to a phase.
///
/// A failed agent still yields a value: a placeholder with zero confidence
/// that asks for escalation, so the phase result is always complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentAnalysis {
    pub agent: AgentId,
    pub phase: Phase,
    pub succeeded: bool,
    /// Headline judgment (the agent's stance)
    pub summary: String,
    pub findings: Vec<String>,
    pub evidence: Vec<String>,
    pub confidence: f64,
    pub should_escalate: bool,
    pub next_actions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AgentAnalysis {
    /// Build a successful analysis from a parsed judgment
    pub fn from_judgment(agent: AgentId, phase: Phase, judgment: ParsedJudgment) -> Self {
        Self {
            agent,
            phase,
            succeeded: true,
            summary: judgment.stance,
            findings: judgment.arguments,
            evidence: judgment.evidence,
            confidence: judgment.confidence,
            should_escalate: judgment.escalate.unwrap_or(false),
            next_actions: judgment.next_actions,
            error: None,
        }
    }

    /// Placeholder for an agent that failed or could not be scheduled
    pub fn failure(agent: AgentId, phase: Phase, error: impl Into<String>) -> Self {
        Self {
            agent,
            phase,
            succeeded: false,
            summary: String::new(),
            findings: Vec::new(),
            evidence: Vec::new(),
            confidence: 0.0,
            should_escalate: true,
            next_actions: Vec::new(),
            error: Some(error.into()),
        }
    }

    /// The analysis seen as a debate position
    pub fn as_position(&self) -> Position {
        Position::new(self.agent.clone(), self.summary.clone(), self.confidence)
            .with_arguments(self.findings.clone())
            .with_evidence(self.evidence.clone())
    }
}
