//! Progress/audit events.
//!
//! Every phase transition and every debate round transition produces a
//! [`DeliberationEvent`]. The shape is fixed here; transport (UI stream,
//! JSONL file, ...) is up to the sink that receives it.

use super::analysis::AgentAnalysis;
use super::phase::Phase;
use crate::deliberation::{DebateOutcome, Round};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    PhaseStarted,
    PhaseCompleted,
    AgentCompleted,
    AgentFailed,
    AgentSkipped,
    DebateStarted,
    RoundStarted,
    RoundCompleted,
    EarlyConsensus,
    FinalVote,
    DebateFinished,
    InsightBroadcast,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::PhaseStarted => "phase_started",
            EventKind::PhaseCompleted => "phase_completed",
            EventKind::AgentCompleted => "agent_completed",
            EventKind::AgentFailed => "agent_failed",
            EventKind::AgentSkipped => "agent_skipped",
            EventKind::DebateStarted => "debate_started",
            EventKind::RoundStarted => "round_started",
            EventKind::RoundCompleted => "round_completed",
            EventKind::EarlyConsensus => "early_consensus",
            EventKind::FinalVote => "final_vote",
            EventKind::DebateFinished => "debate_finished",
            EventKind::InsightBroadcast => "insight_broadcast",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `{timestamp, actor, kind, payload}` record for external observers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliberationEvent {
    pub timestamp: DateTime<Utc>,
    pub actor: String,
    pub kind: EventKind,
    pub payload: Value,
}

/// Actor name used for events the coordinator itself emits
pub const COORDINATOR_ACTOR: &str = "coordinator";

impl DeliberationEvent {
    pub fn new(actor: impl Into<String>, kind: EventKind, payload: Value) -> Self {
        Self {
            timestamp: Utc::now(),
            actor: actor.into(),
            kind,
            payload,
        }
    }

    pub fn phase_started(phase: Phase, agents: &[String]) -> Self {
        Self::new(
            COORDINATOR_ACTOR,
            EventKind::PhaseStarted,
            json!({ "phase": phase.as_str(), "agents": agents }),
        )
    }

    pub fn phase_completed(phase: Phase, confidence: f64, succeeded: usize, failed: usize) -> Self {
        Self::new(
            COORDINATOR_ACTOR,
            EventKind::PhaseCompleted,
            json!({
                "phase": phase.as_str(),
                "confidence": confidence,
                "succeeded": succeeded,
                "failed": failed,
            }),
        )
    }

    /// Transparency record for one agent's result in a phase
    pub fn agent_result(analysis: &AgentAnalysis) -> Self {
        let kind = if analysis.succeeded {
            EventKind::AgentCompleted
        } else {
            EventKind::AgentFailed
        };
        Self::new(
            analysis.agent.as_str(),
            kind,
            json!({
                "agent": analysis.agent,
                "phase": analysis.phase.as_str(),
                "confidence": analysis.confidence,
                "evidence": analysis.evidence,
                "next_actions": analysis.next_actions,
                "should_escalate": analysis.should_escalate,
                "error": analysis.error,
            }),
        )
    }

    pub fn round_started(round: usize, invited: usize) -> Self {
        Self::new(
            COORDINATOR_ACTOR,
            EventKind::RoundStarted,
            json!({ "round": round, "invited": invited }),
        )
    }

    pub fn round_completed(round: &Round) -> Self {
        Self::new(
            COORDINATOR_ACTOR,
            EventKind::RoundCompleted,
            json!({
                "round": round.index,
                "responded": round.positions.len(),
                "absent": round.absent,
                "stances": round.positions.iter().map(|p| p.render()).collect::<Vec<_>>(),
            }),
        )
    }

    pub fn debate_finished(outcome: &DebateOutcome) -> Self {
        Self::new(
            COORDINATOR_ACTOR,
            EventKind::DebateFinished,
            json!({
                "topic": outcome.topic,
                "consensus": outcome.consensus_stance,
                "decision_path": outcome.decision_path.to_string(),
                "confidence": outcome.confidence,
                "rounds": outcome.rounds.len(),
                "dissent": outcome.dissent,
            }),
        )
    }

    /// Phase name carried in the payload, if any
    pub fn phase(&self) -> Option<&str> {
        self.payload.get("phase").and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentId;

    #[test]
    fn test_agent_result_event() {
        let analysis = AgentAnalysis::failure(AgentId::new("PatternAnalyst"), Phase::Analysis, "boom");
        let event = DeliberationEvent::agent_result(&analysis);
        assert_eq!(event.kind, EventKind::AgentFailed);
        assert_eq!(event.actor, "PatternAnalyst");
        assert_eq!(event.phase(), Some("analysis"));
        assert_eq!(event.payload["confidence"], 0.0);
    }

    #[test]
    fn test_event_serializes_kind_snake_case() {
        let event = DeliberationEvent::phase_started(Phase::FollowUp, &["ProactiveAgent".into()]);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "phase_started");
        assert_eq!(json["payload"]["phase"], "follow_up");
    }
}
