//! Run Debate use case
//!
//! Drives the debate coordinator state machine:
//!
//! ```text
//! Gathering ──► Round(k) ──► EarlyConsensusCheck ──┬─► Finalized
//!                  ▲                               │
//!                  └────────── k < max_rounds ─────┤
//!                                                  ▼
//!                                           FinalConsensus ──► Finalized
//! ```

use crate::agents::DeliberativeAgent;
use crate::network::AgentNetwork;
use crate::ports::event_sink::{EventSink, NoEvents};
use crate::use_cases::fan_out::fan_out;
use panel_domain::core::string::mean;
use panel_domain::deliberation::{group_by_stance, largest_group};
use panel_domain::orchestration::event::COORDINATOR_ACTOR;
use panel_domain::{
    AgentId, ConsensusVote, DebateConfig, DebateOutcome, DecisionPath, DeliberationEvent,
    DomainError, EventKind, Impact, Insight, InsightKind, Position, Round,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Author of the insight broadcast when a debate settles
pub const DEBATE_COORDINATOR_AGENT: &str = "DebateCoordinator";

/// Errors that prevent a debate from starting.
///
/// Once running, a debate always produces a [`DebateOutcome`]; failed
/// participants become absences, not errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RunDebateError {
    #[error("Invalid debate: {0}")]
    Domain(#[from] DomainError),
}

/// Input for the RunDebate use case
#[derive(Clone)]
pub struct RunDebateInput {
    pub topic: String,
    pub participants: Vec<Arc<dyn DeliberativeAgent>>,
    pub config: DebateConfig,
}

impl RunDebateInput {
    pub fn new(topic: impl Into<String>, participants: Vec<Arc<dyn DeliberativeAgent>>) -> Self {
        Self {
            topic: topic.into(),
            participants,
            config: DebateConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DebateConfig) -> Self {
        self.config = config;
        self
    }

    fn participant_ids(&self) -> Vec<AgentId> {
        self.participants.iter().map(|a| a.id().clone()).collect()
    }
}

/// Use case for running a bounded multi-round debate
#[derive(Default)]
pub struct RunDebateUseCase {
    network: Option<Arc<AgentNetwork>>,
}

impl RunDebateUseCase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Broadcast settled debates to `network`
    pub fn with_network(mut self, network: Arc<AgentNetwork>) -> Self {
        self.network = Some(network);
        self
    }

    /// Execute the use case without event observers
    pub async fn execute(&self, input: RunDebateInput) -> Result<DebateOutcome, RunDebateError> {
        self.execute_with_events(input, &NoEvents).await
    }

    /// Execute the use case, emitting every round transition to `events`
    pub async fn execute_with_events(
        &self,
        input: RunDebateInput,
        events: &dyn EventSink,
    ) -> Result<DebateOutcome, RunDebateError> {
        if input.participants.is_empty() {
            return Err(DomainError::NoParticipants.into());
        }
        input.config.validate()?;

        let total = input.participants.len();
        info!(
            "Starting debate with {} participants (max {} rounds, threshold {})",
            total, input.config.max_rounds, input.config.consensus_threshold
        );
        events.emit(&DeliberationEvent::new(
            COORDINATOR_ACTOR,
            EventKind::DebateStarted,
            json!({
                "topic": input.topic,
                "participants": input.participant_ids(),
                "max_rounds": input.config.max_rounds,
                "consensus_threshold": input.config.consensus_threshold,
            }),
        ));

        let mut rounds: Vec<Round> = Vec::new();

        for index in 1..=input.config.max_rounds {
            let round = self.run_round(&input, index, rounds.last(), events).await;

            if round.is_empty() {
                warn!("Round {} produced no positions; stopping", index);
                rounds.push(round);
                let outcome = Self::no_quorum(&input, rounds, index);
                return Ok(self.finalize(outcome, events));
            }

            if let Some((stance, dissent)) = Self::early_consensus(&input.config, &round, total) {
                info!("Early consensus in round {}: {}", index, stance);
                events.emit(&DeliberationEvent::new(
                    COORDINATOR_ACTOR,
                    EventKind::EarlyConsensus,
                    json!({ "round": index, "stance": stance, "dissent": dissent }),
                ));
                let confidence = mean(round.positions.iter().map(|p| p.confidence));
                rounds.push(round);
                let outcome = DebateOutcome {
                    topic: input.topic.clone(),
                    participants: input.participant_ids(),
                    rounds,
                    consensus_stance: Some(stance),
                    dissent,
                    decision_path: DecisionPath::EarlyConsensus { round: index },
                    confidence,
                    votes: Vec::new(),
                };
                return Ok(self.finalize(outcome, events));
            }

            debug!("No early consensus after round {}", index);
            rounds.push(round);
        }

        let outcome = self.final_vote(&input, rounds, events).await;
        Ok(self.finalize(outcome, events))
    }

    /// Gathering (round 1) or a response round (k >= 2).
    ///
    /// Every participant is invited, including agents absent last round.
    async fn run_round(
        &self,
        input: &RunDebateInput,
        index: usize,
        previous: Option<&Round>,
        events: &dyn EventSink,
    ) -> Round {
        events.emit(&DeliberationEvent::round_started(index, input.participants.len()));

        let topic = input.topic.clone();
        let gathered = match previous {
            None => {
                fan_out(&input.participants, |agent| {
                    let topic = topic.clone();
                    async move { agent.state_position(&topic).await }
                })
                .await
            }
            Some(previous) => {
                let prior = Arc::new(previous.positions.clone());
                fan_out(&input.participants, |agent| {
                    let topic = topic.clone();
                    let prior = Arc::clone(&prior);
                    async move { agent.respond_to_positions(&topic, &prior, index).await }
                })
                .await
            }
        };

        let mut positions = Vec::new();
        let mut absent = gathered.lost;
        for (agent, result) in gathered.results {
            match result {
                Ok(mut position) => {
                    position.agent = agent;
                    positions.push(position);
                }
                Err(e) => {
                    warn!("{} is absent from round {}: {}", agent, index, e);
                    absent.push(agent);
                }
            }
        }

        let round = Round::new(index, positions, absent);
        events.emit(&DeliberationEvent::round_completed(&round));
        round
    }

    /// Stance and dissent when the largest group clears the threshold.
    fn early_consensus(
        config: &DebateConfig,
        round: &Round,
        total: usize,
    ) -> Option<(String, Vec<String>)> {
        let groups = group_by_stance(&round.positions);
        let largest = largest_group(&groups)?;
        if !config.is_met(largest.size(), total) {
            return None;
        }

        let dissent = round
            .positions
            .iter()
            .filter(|p| p.stance_key() != largest.key)
            .map(Position::render)
            .collect();
        Some((largest.stance.to_string(), dissent))
    }

    /// FinalConsensus: every participant evaluates the final positions.
    ///
    /// A participant whose evaluation fails counts as not agreeing.
    async fn final_vote(
        &self,
        input: &RunDebateInput,
        rounds: Vec<Round>,
        events: &dyn EventSink,
    ) -> DebateOutcome {
        let total = input.participants.len();
        let final_positions = rounds
            .last()
            .map(|r| r.positions.clone())
            .unwrap_or_default();

        info!("No early consensus; running final vote over {} positions", final_positions.len());

        let shared = Arc::new(final_positions.clone());
        let topic = input.topic.clone();
        let gathered = fan_out(&input.participants, |agent| {
            let topic = topic.clone();
            let positions = Arc::clone(&shared);
            async move { agent.evaluate_consensus(&topic, &positions).await }
        })
        .await;

        let mut votes: Vec<ConsensusVote> = Vec::new();
        for (agent, result) in gathered.results {
            match result {
                Ok(mut vote) => {
                    vote.agent = agent;
                    votes.push(vote);
                }
                Err(e) => warn!("{} did not vote: {}", agent, e),
            }
        }
        let agreements = votes.iter().filter(|v| v.agrees).count();
        let reached = input.config.is_met(agreements, total);

        events.emit(&DeliberationEvent::new(
            COORDINATOR_ACTOR,
            EventKind::FinalVote,
            json!({
                "agreements": agreements,
                "votes": votes.len(),
                "participants": total,
                "reached": reached,
            }),
        ));

        let confidence = mean(final_positions.iter().map(|p| p.confidence));
        let (consensus_stance, dissent, decision_path) = if reached {
            let groups = group_by_stance(&final_positions);
            let stance = largest_group(&groups).map(|g| g.stance.to_string());
            let dissent = votes
                .iter()
                .filter(|v| !v.agrees)
                .map(ConsensusVote::render)
                .collect();
            (stance, dissent, DecisionPath::FinalVote)
        } else {
            let dissent = final_positions.iter().map(Position::render).collect();
            (None, dissent, DecisionPath::NoConsensus)
        };

        DebateOutcome {
            topic: input.topic.clone(),
            participants: input.participant_ids(),
            rounds,
            consensus_stance,
            dissent,
            decision_path,
            confidence,
            votes,
        }
    }

    /// Terminal outcome for a round nobody answered.
    fn no_quorum(input: &RunDebateInput, rounds: Vec<Round>, index: usize) -> DebateOutcome {
        let dissent = rounds
            .iter()
            .rev()
            .find(|r| !r.is_empty())
            .map(|r| r.positions.iter().map(Position::render).collect())
            .unwrap_or_default();

        DebateOutcome {
            topic: input.topic.clone(),
            participants: input.participant_ids(),
            rounds,
            consensus_stance: None,
            dissent,
            decision_path: DecisionPath::NoQuorum { round: index },
            confidence: 0.0,
            votes: Vec::new(),
        }
    }

    fn finalize(&self, outcome: DebateOutcome, events: &dyn EventSink) -> DebateOutcome {
        info!(
            "Debate finished: {} (confidence {:.2})",
            outcome.decision_path, outcome.confidence
        );

        if let (Some(network), Some(stance)) = (&self.network, &outcome.consensus_stance) {
            let insight = Insight::new(
                DEBATE_COORDINATOR_AGENT,
                InsightKind::Recommendation,
                format!("Panel agreed on '{}' for: {}", stance, outcome.topic),
                Impact::Medium,
            )
            .with_confidence(outcome.confidence)
            .with_evidence(outcome.dissent.clone())
            .with_related_data(json!({ "decision_path": outcome.decision_path.to_string() }));

            events.emit(&DeliberationEvent::new(
                DEBATE_COORDINATOR_AGENT,
                EventKind::InsightBroadcast,
                json!({ "kind": insight.kind, "impact": insight.impact, "content": insight.content }),
            ));
            network.broadcast(insight);
        }

        events.emit(&DeliberationEvent::debate_finished(&outcome));
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::event_sink::RecordingSink;
    use crate::use_cases::test_support::{ScriptedAgent, panel};
    use panel_domain::{ConsensusBuilder, normalize_stance};
    use std::sync::atomic::Ordering;

    fn sorted(mut v: Vec<String>) -> Vec<String> {
        v.sort();
        v
    }

    #[tokio::test]
    async fn test_unanimous_first_round_is_early_consensus() {
        let agents = vec![
            ScriptedAgent::new("a").positions(&[Some(("approve", 0.9))]).shared(),
            ScriptedAgent::new("b").positions(&[Some(("Approve.", 0.8))]).shared(),
            ScriptedAgent::new("c").positions(&[Some(("APPROVE", 0.7))]).shared(),
        ];

        let outcome = RunDebateUseCase::new()
            .execute(RunDebateInput::new("ship it?", panel(&agents)))
            .await
            .unwrap();

        assert_eq!(outcome.decision_path, DecisionPath::EarlyConsensus { round: 1 });
        let stance = outcome.consensus_stance.as_deref().map(normalize_stance);
        assert_eq!(stance.as_deref(), Some("approve"));
        assert!(outcome.dissent.is_empty());
        assert!((outcome.confidence - 0.8).abs() < 1e-9);
        assert_eq!(outcome.rounds_run(), 1);
        assert!(outcome.votes.is_empty());
    }

    #[tokio::test]
    async fn test_three_to_one_split_meets_threshold() {
        let agents = vec![
            ScriptedAgent::new("a").positions(&[Some(("refund", 0.9))]).shared(),
            ScriptedAgent::new("b").positions(&[Some(("refund", 0.8))]).shared(),
            ScriptedAgent::new("c").positions(&[Some(("refund", 0.7))]).shared(),
            ScriptedAgent::new("d").positions(&[Some(("escalate", 0.6))]).shared(),
        ];

        let outcome = RunDebateUseCase::new()
            .execute(RunDebateInput::new("T-1", panel(&agents)))
            .await
            .unwrap();

        assert_eq!(outcome.decision_path, DecisionPath::EarlyConsensus { round: 1 });
        assert_eq!(outcome.consensus_stance.as_deref(), Some("refund"));
        assert_eq!(outcome.dissent, vec!["d: escalate"]);
    }

    #[tokio::test]
    async fn test_persistent_disagreement_fails_final_vote() {
        let stances = ["refund", "credit", "escalate", "wait", "close"];
        let agents: Vec<_> = stances
            .iter()
            .enumerate()
            .map(|(i, stance)| {
                let id = format!("agent-{i}");
                ScriptedAgent::new(&id)
                    .positions(&[Some((*stance, 0.5)), Some((*stance, 0.5)), Some((*stance, 0.5))])
                    .votes(&[Some(false)])
                    .shared()
            })
            .collect();

        let outcome = RunDebateUseCase::new()
            .execute(RunDebateInput::new("T-2", panel(&agents)))
            .await
            .unwrap();

        assert_eq!(outcome.rounds_run(), 3);
        assert_eq!(outcome.decision_path, DecisionPath::NoConsensus);
        assert!(outcome.consensus_stance.is_none());
        assert_eq!(outcome.dissent.len(), 5);
        assert_eq!(outcome.votes.len(), 5);

        let final_round = outcome.final_round().unwrap();
        let builder = ConsensusBuilder::new().with_minimum_support(0.66).unwrap();
        let result = builder.build(&final_round.positions, &outcome.participants);
        assert!(!result.reached);
        assert_eq!(result.alternatives.len(), 5);
    }

    #[tokio::test]
    async fn test_absent_agent_is_invited_again() {
        let a = ScriptedAgent::new("a")
            .positions(&[Some(("p", 0.5)), Some(("q", 0.5)), Some(("r", 0.5))])
            .votes(&[Some(false)])
            .shared();
        let b = ScriptedAgent::new("b")
            .positions(&[Some(("s", 0.5)), Some(("t", 0.5)), Some(("u", 0.5))])
            .votes(&[Some(false)])
            .shared();
        let x = ScriptedAgent::new("x")
            .positions(&[Some(("v", 0.5)), None, Some(("w", 0.5))])
            .votes(&[None])
            .shared();
        let agents = vec![a, b, Arc::clone(&x)];

        let outcome = RunDebateUseCase::new()
            .execute(RunDebateInput::new("T-3", panel(&agents)))
            .await
            .unwrap();

        assert_eq!(outcome.rounds[1].positions.len(), 2);
        assert_eq!(outcome.rounds[1].absent, vec![AgentId::new("x")]);
        assert!(outcome.rounds[2].position_of(&AgentId::new("x")).is_some());
        assert_eq!(x.position_calls.load(Ordering::SeqCst), 3);
        // failed evaluation is simply not a vote
        assert_eq!(outcome.votes.len(), 2);
        assert_eq!(outcome.decision_path, DecisionPath::NoConsensus);
    }

    #[tokio::test]
    async fn test_never_exceeds_max_rounds() {
        let agents: Vec<_> = ["a", "b"]
            .iter()
            .map(|id| {
                ScriptedAgent::new(id)
                    .positions(&[
                        Some((*id, 0.5)),
                        Some((*id, 0.5)),
                        Some((*id, 0.5)),
                        Some((*id, 0.5)),
                        Some((*id, 0.5)),
                    ])
                    .votes(&[Some(false)])
                    .shared()
            })
            .collect();

        let config = DebateConfig::default().with_max_rounds(2);
        let outcome = RunDebateUseCase::new()
            .execute(RunDebateInput::new("T-4", panel(&agents)).with_config(config))
            .await
            .unwrap();

        assert_eq!(outcome.rounds_run(), 2);
        for agent in &agents {
            assert_eq!(agent.position_calls.load(Ordering::SeqCst), 2);
        }
    }

    #[tokio::test]
    async fn test_stops_at_first_agreeing_round() {
        let agents = vec![
            ScriptedAgent::new("a")
                .positions(&[Some(("refund", 0.6)), Some(("refund", 0.9))])
                .shared(),
            ScriptedAgent::new("b")
                .positions(&[Some(("credit", 0.6)), Some(("Refund", 0.7))])
                .shared(),
        ];

        let outcome = RunDebateUseCase::new()
            .execute(RunDebateInput::new("T-5", panel(&agents)))
            .await
            .unwrap();

        assert_eq!(outcome.decision_path, DecisionPath::EarlyConsensus { round: 2 });
        let stance = outcome.consensus_stance.as_deref().map(normalize_stance);
        assert_eq!(stance.as_deref(), Some("refund"));
        assert!((outcome.confidence - 0.8).abs() < 1e-9);
        for agent in &agents {
            assert_eq!(agent.position_calls.load(Ordering::SeqCst), 2);
            assert_eq!(agent.vote_calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn test_final_vote_reaches_consensus() {
        let agents = vec![
            ScriptedAgent::new("a")
                .positions(&[Some(("refund", 0.8)), Some(("refund", 0.8))])
                .votes(&[Some(true)])
                .shared(),
            ScriptedAgent::new("b")
                .positions(&[Some(("refund", 0.6)), Some(("refund", 0.6))])
                .votes(&[Some(true)])
                .shared(),
            ScriptedAgent::new("c")
                .positions(&[Some(("credit", 0.4)), Some(("credit", 0.4))])
                .votes(&[Some(true)])
                .shared(),
            ScriptedAgent::new("d")
                .positions(&[Some(("escalate", 0.2)), Some(("escalate", 0.2))])
                .votes(&[Some(false)])
                .shared(),
        ];

        let config = DebateConfig::default().with_max_rounds(2);
        let outcome = RunDebateUseCase::new()
            .execute(RunDebateInput::new("T-6", panel(&agents)).with_config(config))
            .await
            .unwrap();

        assert_eq!(outcome.decision_path, DecisionPath::FinalVote);
        assert_eq!(outcome.consensus_stance.as_deref(), Some("refund"));
        assert_eq!(outcome.dissent, vec!["d: not convinced"]);
        assert!((outcome.confidence - 0.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_silent_first_round_is_no_quorum() {
        let agents = vec![
            ScriptedAgent::new("a").positions(&[None]).shared(),
            ScriptedAgent::new("b").positions(&[None]).shared(),
        ];

        let outcome = RunDebateUseCase::new()
            .execute(RunDebateInput::new("T-7", panel(&agents)))
            .await
            .unwrap();

        assert_eq!(outcome.decision_path, DecisionPath::NoQuorum { round: 1 });
        assert!(outcome.is_no_quorum());
        assert!(outcome.consensus_stance.is_none());
        assert_eq!(outcome.confidence, 0.0);
        assert!(outcome.dissent.is_empty());
    }

    #[tokio::test]
    async fn test_no_quorum_keeps_last_known_positions() {
        let agents = vec![
            ScriptedAgent::new("a").positions(&[Some(("refund", 0.5)), None]).shared(),
            ScriptedAgent::new("b").positions(&[Some(("credit", 0.5)), None]).shared(),
        ];

        let outcome = RunDebateUseCase::new()
            .execute(RunDebateInput::new("T-8", panel(&agents)))
            .await
            .unwrap();

        assert_eq!(outcome.decision_path, DecisionPath::NoQuorum { round: 2 });
        assert_eq!(outcome.rounds_run(), 2);
        assert_eq!(sorted(outcome.dissent), vec!["a: refund", "b: credit"]);
    }

    #[tokio::test]
    async fn test_invalid_input_is_rejected() {
        let use_case = RunDebateUseCase::new();
        assert_eq!(
            use_case.execute(RunDebateInput::new("t", vec![])).await.unwrap_err(),
            RunDebateError::Domain(DomainError::NoParticipants)
        );

        let agents = vec![ScriptedAgent::new("a").shared()];
        let input = RunDebateInput::new("t", panel(&agents))
            .with_config(DebateConfig::default().with_consensus_threshold(1.5));
        assert!(matches!(
            use_case.execute(input).await,
            Err(RunDebateError::Domain(DomainError::InvalidThreshold { .. }))
        ));
    }

    #[tokio::test]
    async fn test_emits_round_events_and_broadcasts_result() {
        let network = Arc::new(AgentNetwork::new());
        let agents = vec![
            ScriptedAgent::new("a").positions(&[Some(("refund", 0.9))]).shared(),
            ScriptedAgent::new("b").positions(&[Some(("refund", 0.7))]).shared(),
        ];
        let sink = RecordingSink::new(&NoEvents);

        RunDebateUseCase::new()
            .with_network(Arc::clone(&network))
            .execute_with_events(RunDebateInput::new("T-9", panel(&agents)), &sink)
            .await
            .unwrap();

        let kinds: Vec<_> = sink.events().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::DebateStarted,
                EventKind::RoundStarted,
                EventKind::RoundCompleted,
                EventKind::EarlyConsensus,
                EventKind::InsightBroadcast,
                EventKind::DebateFinished,
            ]
        );

        let history = network.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].kind, InsightKind::Recommendation);
        assert_eq!(history[0].agent, AgentId::new(DEBATE_COORDINATOR_AGENT));
    }
}
