//! Final output of a deliberation.

use super::analysis::AgentAnalysis;
use super::event::{DeliberationEvent, EventKind};
use crate::consensus::ConsensusResult;
use crate::deliberation::DebateOutcome;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliberationMetrics {
    /// Mean confidence over agents that completed successfully
    pub overall_confidence: f64,
    pub should_escalate: bool,
    pub agents_succeeded: usize,
    pub agents_failed: usize,
    /// Wall-clock time per phase, keyed by phase name
    pub phase_durations_ms: BTreeMap<String, u64>,
}

/// Everything a caller needs to persist or render a finished case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliberationResult {
    pub case_id: String,
    pub recommendation: String,
    pub analyses: Vec<AgentAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debate: Option<DebateOutcome>,
    /// Consensus over the analysis-phase stances
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consensus: Option<ConsensusResult>,
    pub metrics: DeliberationMetrics,
    pub audit_trail: Vec<DeliberationEvent>,
}

impl DeliberationResult {
    /// `(phase, started|completed)` pairs in the order they happened
    pub fn phase_timeline(&self) -> Vec<(String, EventKind)> {
        self.audit_trail
            .iter()
            .filter(|e| matches!(e.kind, EventKind::PhaseStarted | EventKind::PhaseCompleted))
            .filter_map(|e| e.phase().map(|p| (p.to_string(), e.kind)))
            .collect()
    }

    pub fn successful_analyses(&self) -> impl Iterator<Item = &AgentAnalysis> {
        self.analyses.iter().filter(|a| a.succeeded)
    }
}
