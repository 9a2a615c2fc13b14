//! Run Deliberation use case
//!
//! Drives a case through the orchestrated phases:
//!
//! 1. **Analysis** (parallel): the configured specialists analyze the case
//! 2. **Debate** (optional): runs only when analysis stances diverge
//! 3. **Solution**: the solution architect designs a resolution
//! 4. **Follow-up**: the proactive agent plans follow-up from the solution
//! 5. **Synthesis**: one recommendation plus metrics

use crate::agents::{AgentRoster, DeliberativeAgent};
use crate::config::{OrchestratorConfig, RECOMMENDATION_CONFIDENCE};
use crate::network::AgentNetwork;
use crate::ports::event_sink::{EventSink, NoEvents, RecordingSink};
use crate::use_cases::fan_out::fan_out;
use crate::use_cases::run_debate::{RunDebateError, RunDebateInput, RunDebateUseCase};
use panel_domain::core::string::mean;
use panel_domain::deliberation::group_by_stance;
use panel_domain::{
    AgentAnalysis, AgentId, AgentRole, AnalysisRequest, Case, ConsensusBuilder, ConsensusResult,
    DebateOutcome, DeliberationEvent, DeliberationMetrics, DeliberationResult, DomainError,
    EventKind, Impact, Insight, InsightKind, Memory, Phase, Position,
};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during a deliberation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeliberationError {
    #[error("Invalid deliberation: {0}")]
    Domain(#[from] DomainError),

    #[error("No agent is seated for role {0}")]
    MissingAgent(AgentRole),

    #[error("Debate failed: {0}")]
    Debate(#[from] RunDebateError),

    #[error("No quorum: every agent failed on case {case_id}")]
    NoQuorum { case_id: String },
}

impl DeliberationError {
    pub fn is_no_quorum(&self) -> bool {
        matches!(self, DeliberationError::NoQuorum { .. })
    }
}

/// Use case for deliberating on one case
pub struct RunDeliberationUseCase {
    roster: AgentRoster,
    network: Arc<AgentNetwork>,
    config: OrchestratorConfig,
    builder: ConsensusBuilder,
}

impl RunDeliberationUseCase {
    pub fn new(
        roster: AgentRoster,
        network: Arc<AgentNetwork>,
        config: OrchestratorConfig,
    ) -> Result<Self, DeliberationError> {
        config.validate()?;
        let required: Vec<AgentRole> = config
            .parallel_agents
            .iter()
            .copied()
            .chain([AgentRole::SolutionArchitect, AgentRole::ProactiveAgent])
            .collect();
        if let Some(role) = roster.missing(&required) {
            return Err(DeliberationError::MissingAgent(role));
        }

        for role in &required {
            if let Some(agent) = roster.get(*role) {
                network.register_agent(
                    agent.id().clone(),
                    role.expertise().iter().map(|t| t.to_string()).collect(),
                );
            }
        }

        let builder = ConsensusBuilder::new().with_minimum_support(config.minimum_support)?;
        Ok(Self {
            roster,
            network,
            config,
            builder,
        })
    }

    /// Replace the consensus builder (e.g. to plug in another classifier)
    pub fn with_builder(mut self, builder: ConsensusBuilder) -> Self {
        self.builder = builder;
        self
    }

    pub fn network(&self) -> &Arc<AgentNetwork> {
        &self.network
    }

    /// Execute the use case without event observers
    pub async fn execute(&self, case: Case) -> Result<DeliberationResult, DeliberationError> {
        self.execute_with_events(case, &NoEvents).await
    }

    /// Execute the use case, streaming every audit event to `events`
    pub async fn execute_with_events(
        &self,
        case: Case,
        events: &dyn EventSink,
    ) -> Result<DeliberationResult, DeliberationError> {
        case.validate()?;
        info!("Deliberating on case {} ({})", case.id, case.title);

        let recorder = RecordingSink::new(events);
        let mut durations = BTreeMap::new();

        let memories: Vec<String> = self
            .network
            .memories_for(&case.subject)
            .iter()
            .map(Memory::summary)
            .collect();
        debug!("{} prior memories for {}", memories.len(), case.subject);

        // Phase 1: parallel analysis
        let started = Instant::now();
        let analyses = self.phase_analysis(&case, memories, &recorder).await;
        durations.insert(Phase::Analysis.as_str().to_string(), elapsed_ms(started));

        // Optional debate over diverging stances
        let debate = if self.config.enable_debate && stances_diverge(&analyses) {
            let started = Instant::now();
            let outcome = self.phase_debate(&case, &recorder).await?;
            durations.insert(Phase::Debate.as_str().to_string(), elapsed_ms(started));
            outcome
        } else {
            None
        };
        let notes = debate.as_ref().map(debate_notes).unwrap_or_default();

        // Phase 2: solution from every analysis
        let started = Instant::now();
        let request = AnalysisRequest::new(case.clone(), Phase::Solution)
            .with_prior_analyses(analyses.clone())
            .with_notes(notes);
        let solution = self
            .phase_single(AgentRole::SolutionArchitect, request, &recorder)
            .await;
        durations.insert(Phase::Solution.as_str().to_string(), elapsed_ms(started));

        // Phase 3: follow-up from the solution
        let started = Instant::now();
        let request = AnalysisRequest::new(case.clone(), Phase::FollowUp)
            .with_prior_analyses(vec![solution.clone()]);
        let follow_up = self
            .phase_single(AgentRole::ProactiveAgent, request, &recorder)
            .await;
        durations.insert(Phase::FollowUp.as_str().to_string(), elapsed_ms(started));

        let mut all = analyses.clone();
        all.push(solution.clone());
        all.push(follow_up.clone());

        if all.iter().all(|a| !a.succeeded) {
            warn!("Every agent failed on case {}", case.id);
            return Err(DeliberationError::NoQuorum { case_id: case.id });
        }

        // Synthesis
        let started = Instant::now();
        recorder.emit(&DeliberationEvent::phase_started(Phase::Synthesis, &[]));
        let (recommendation, consensus) =
            self.synthesize(&analyses, &solution, &follow_up, debate.as_ref());
        let mut metrics = self.metrics(&all);
        recorder.emit(&DeliberationEvent::phase_completed(
            Phase::Synthesis,
            metrics.overall_confidence,
            metrics.agents_succeeded,
            metrics.agents_failed,
        ));
        durations.insert(Phase::Synthesis.as_str().to_string(), elapsed_ms(started));
        metrics.phase_durations_ms = durations;

        info!(
            "Case {} deliberated: confidence {:.2}, escalate {}",
            case.id, metrics.overall_confidence, metrics.should_escalate
        );

        Ok(DeliberationResult {
            case_id: case.id,
            recommendation,
            analyses: all,
            debate,
            consensus: Some(consensus),
            metrics,
            audit_trail: recorder.into_events(),
        })
    }

    /// Phase 1: every configured specialist analyzes the case concurrently.
    ///
    /// Results come back in configured order; busy or failing agents are
    /// replaced by failure placeholders.
    async fn phase_analysis(
        &self,
        case: &Case,
        memories: Vec<String>,
        events: &dyn EventSink,
    ) -> Vec<AgentAnalysis> {
        let phase = Phase::Analysis;
        let agents = self.roster.agents_for(&self.config.parallel_agents);
        let ids: Vec<String> = agents.iter().map(|a| a.id().to_string()).collect();
        info!("Phase 1: {} with {} agents", phase.display_name(), agents.len());
        events.emit(&DeliberationEvent::phase_started(phase, &ids));

        let mut placeholders = Vec::new();
        let mut scheduled: Vec<Arc<dyn DeliberativeAgent>> = Vec::new();
        for agent in agents {
            match self.network.start_task(agent.id(), task_label(case, phase)) {
                Ok(()) => scheduled.push(agent),
                Err(e) => {
                    warn!("Skipping {}: {}", agent.id(), e);
                    let placeholder = AgentAnalysis::failure(agent.id().clone(), phase, e.to_string());
                    events.emit(&skipped(agent.id(), phase, &e.to_string()));
                    placeholders.push(placeholder);
                }
            }
        }

        let request = Arc::new(AnalysisRequest::new(case.clone(), phase).with_memories(memories));
        let gathered = fan_out(&scheduled, |agent| {
            let request = Arc::clone(&request);
            async move { agent.analyze(&request).await }
        })
        .await;

        let mut analyses = placeholders;
        for (agent, result) in gathered.results {
            let analysis = self.settle(agent, phase, result.map_err(|e| e.to_string()));
            events.emit(&DeliberationEvent::agent_result(&analysis));
            analyses.push(analysis);
        }
        for agent in gathered.lost {
            let analysis = self.settle(agent, phase, Err("task aborted".to_string()));
            events.emit(&DeliberationEvent::agent_result(&analysis));
            analyses.push(analysis);
        }

        let order: Vec<AgentId> = self
            .roster
            .agents_for(&self.config.parallel_agents)
            .iter()
            .map(|a| a.id().clone())
            .collect();
        analyses.sort_by_key(|a| order.iter().position(|id| *id == a.agent));

        self.broadcast_insights(&analyses, events);
        events.emit(&phase_completed(phase, &analyses));
        analyses
    }

    /// Debate among the analysis-phase agents on the case topic.
    ///
    /// Participants are marked busy for the whole debate; agents busy with
    /// other work sit it out. `None` when no agent could take part.
    async fn phase_debate(
        &self,
        case: &Case,
        events: &dyn EventSink,
    ) -> Result<Option<DebateOutcome>, DeliberationError> {
        let phase = Phase::Debate;
        let agents = self.roster.agents_for(&self.config.parallel_agents);
        let ids: Vec<String> = agents.iter().map(|a| a.id().to_string()).collect();
        events.emit(&DeliberationEvent::phase_started(phase, &ids));

        let mut participants: Vec<Arc<dyn DeliberativeAgent>> = Vec::new();
        for agent in agents {
            match self.network.start_task(agent.id(), task_label(case, phase)) {
                Ok(()) => participants.push(agent),
                Err(e) => {
                    warn!("{} sits out the debate: {}", agent.id(), e);
                    events.emit(&skipped(agent.id(), phase, &e.to_string()));
                }
            }
        }

        if participants.is_empty() {
            warn!("No agent free to debate case {}", case.id);
            events.emit(&DeliberationEvent::phase_completed(phase, 0.0, 0, ids.len()));
            return Ok(None);
        }

        info!("Analysis stances diverge; debating among {} agents", participants.len());
        let claimed: Vec<AgentId> = participants.iter().map(|a| a.id().clone()).collect();
        let input = RunDebateInput::new(case.topic(), participants).with_config(self.config.debate);
        let outcome = RunDebateUseCase::new()
            .with_network(Arc::clone(&self.network))
            .execute_with_events(input, events)
            .await;

        let final_round = outcome.as_ref().ok().and_then(DebateOutcome::final_round);
        for id in &claimed {
            let position = final_round.and_then(|r| r.position_of(id));
            if let Err(e) =
                self.network
                    .finish_task(id, position.is_some(), position.map(|p| p.confidence))
            {
                debug!("Status not updated: {}", e);
            }
        }
        let outcome = outcome?;

        let responded = outcome.final_round().map_or(0, |r| r.positions.len());
        events.emit(&DeliberationEvent::phase_completed(
            phase,
            outcome.confidence,
            responded,
            ids.len().saturating_sub(responded),
        ));
        Ok(Some(outcome))
    }

    /// Sequential phase run by a single role
    async fn phase_single(
        &self,
        role: AgentRole,
        request: AnalysisRequest,
        events: &dyn EventSink,
    ) -> AgentAnalysis {
        let phase = request.phase;
        info!("Phase: {} by {}", phase.display_name(), role);

        let Some(agent) = self.roster.get(role) else {
            return AgentAnalysis::failure(role.id(), phase, "no agent seated");
        };
        events.emit(&DeliberationEvent::phase_started(phase, &[agent.id().to_string()]));

        let analysis = match self.network.start_task(agent.id(), task_label(&request.case, phase)) {
            Ok(()) => {
                let result = agent.analyze(&request).await.map_err(|e| e.to_string());
                self.settle(agent.id().clone(), phase, result)
            }
            Err(e) => {
                warn!("Skipping {}: {}", agent.id(), e);
                events.emit(&skipped(agent.id(), phase, &e.to_string()));
                AgentAnalysis::failure(agent.id().clone(), phase, e.to_string())
            }
        };
        events.emit(&DeliberationEvent::agent_result(&analysis));

        let single = std::slice::from_ref(&analysis);
        self.broadcast_insights(single, events);
        events.emit(&phase_completed(phase, single));
        analysis
    }

    /// Turn a call result into an analysis and release the agent
    fn settle(
        &self,
        agent: AgentId,
        phase: Phase,
        result: Result<AgentAnalysis, String>,
    ) -> AgentAnalysis {
        let analysis = match result {
            Ok(mut analysis) => {
                analysis.agent = agent;
                analysis.phase = phase;
                analysis
            }
            Err(e) => {
                warn!("{} failed during {}: {}", agent, phase.as_str(), e);
                AgentAnalysis::failure(agent, phase, e)
            }
        };

        let confidence = analysis.succeeded.then_some(analysis.confidence);
        if let Err(e) = self
            .network
            .finish_task(&analysis.agent, analysis.succeeded, confidence)
        {
            debug!("Status not updated: {}", e);
        }
        analysis
    }

    /// Warnings for escalation requests, recommendations for confident analyses
    fn broadcast_insights(&self, analyses: &[AgentAnalysis], events: &dyn EventSink) {
        for analysis in analyses.iter().filter(|a| a.succeeded) {
            let mut insights = Vec::new();
            if analysis.should_escalate {
                insights.push(Insight::new(
                    analysis.agent.clone(),
                    InsightKind::Warning,
                    format!("Escalation requested: {}", analysis.summary),
                    Impact::High,
                ));
            }
            if analysis.confidence >= RECOMMENDATION_CONFIDENCE {
                insights.push(Insight::new(
                    analysis.agent.clone(),
                    InsightKind::Recommendation,
                    analysis.summary.clone(),
                    Impact::Medium,
                ));
            }

            for insight in insights {
                let insight = insight
                    .with_confidence(analysis.confidence)
                    .with_evidence(analysis.evidence.clone())
                    .with_related_data(json!({ "phase": analysis.phase.as_str() }));
                events.emit(&DeliberationEvent::new(
                    analysis.agent.as_str(),
                    EventKind::InsightBroadcast,
                    json!({
                        "kind": insight.kind,
                        "impact": insight.impact,
                        "content": insight.content,
                    }),
                ));
                self.network.broadcast(insight);
            }
        }
    }

    /// Recommendation text plus the consensus over analysis stances.
    ///
    /// The solution architect's answer leads when it exists; otherwise the
    /// panel's consensus, or a compromise when there is none.
    fn synthesize(
        &self,
        analyses: &[AgentAnalysis],
        solution: &AgentAnalysis,
        follow_up: &AgentAnalysis,
        debate: Option<&DebateOutcome>,
    ) -> (String, ConsensusResult) {
        let participants: Vec<AgentId> = analyses.iter().map(|a| a.agent.clone()).collect();
        let positions: Vec<Position> = analyses
            .iter()
            .filter(|a| a.succeeded)
            .map(AgentAnalysis::as_position)
            .collect();
        let consensus = self.builder.build(&positions, &participants);

        let headline = if solution.succeeded {
            solution.summary.clone()
        } else if let Some(stance) = debate.and_then(|d| d.consensus_stance.as_ref()) {
            stance.clone()
        } else if let Some(selected) = consensus.selected.as_ref() {
            selected.description.clone()
        } else {
            let constraints: Vec<String> = analyses
                .iter()
                .filter(|a| a.succeeded && a.agent == AgentRole::ComplianceGuardian.id())
                .flat_map(|a| a.findings.iter().cloned())
                .collect();
            self.builder
                .synthesize_compromise(&positions, &participants, &constraints)
                .description
        };

        let mut recommendation = headline;
        let actions: Vec<&String> = solution
            .next_actions
            .iter()
            .chain(follow_up.next_actions.iter())
            .collect();
        if !actions.is_empty() {
            recommendation.push_str("\n\nNext actions:");
            for action in actions {
                recommendation.push_str(&format!("\n- {action}"));
            }
        }
        if follow_up.succeeded && !follow_up.summary.is_empty() {
            recommendation.push_str(&format!("\n\nFollow-up: {}", follow_up.summary));
        }

        (recommendation, consensus)
    }

    fn metrics(&self, analyses: &[AgentAnalysis]) -> DeliberationMetrics {
        let succeeded: Vec<&AgentAnalysis> = analyses.iter().filter(|a| a.succeeded).collect();
        let overall_confidence = mean(succeeded.iter().map(|a| a.confidence));
        let should_escalate = overall_confidence < self.config.escalation_threshold
            || analyses.iter().any(|a| a.should_escalate);

        DeliberationMetrics {
            overall_confidence,
            should_escalate,
            agents_succeeded: succeeded.len(),
            agents_failed: analyses.len() - succeeded.len(),
            phase_durations_ms: BTreeMap::new(),
        }
    }
}

fn task_label(case: &Case, phase: Phase) -> String {
    format!("{}:{}", case.id, phase.as_str())
}

fn skipped(agent: &AgentId, phase: Phase, reason: &str) -> DeliberationEvent {
    DeliberationEvent::new(
        agent.as_str(),
        EventKind::AgentSkipped,
        json!({ "agent": agent, "phase": phase.as_str(), "reason": reason }),
    )
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// More than one stance group among successful analyses
fn stances_diverge(analyses: &[AgentAnalysis]) -> bool {
    let positions: Vec<Position> = analyses
        .iter()
        .filter(|a| a.succeeded)
        .map(AgentAnalysis::as_position)
        .collect();
    group_by_stance(&positions).len() > 1
}

fn debate_notes(outcome: &DebateOutcome) -> Vec<String> {
    let mut notes = vec![match &outcome.consensus_stance {
        Some(stance) => format!("Debate agreed on: {stance} ({})", outcome.decision_path),
        None => format!("Debate ended without agreement ({})", outcome.decision_path),
    }];
    notes.extend(outcome.dissent.iter().map(|d| format!("Dissent: {d}")));
    notes
}

fn phase_completed(phase: Phase, analyses: &[AgentAnalysis]) -> DeliberationEvent {
    let succeeded = analyses.iter().filter(|a| a.succeeded).count();
    let confidence = mean(analyses.iter().filter(|a| a.succeeded).map(|a| a.confidence));
    DeliberationEvent::phase_completed(phase, confidence, succeeded, analyses.len() - succeeded)
}
