//! Scripted agents for use case tests.

use crate::agents::{DeliberativeAgent, InferenceError};
use async_trait::async_trait;
use panel_domain::{AgentAnalysis, AgentId, AnalysisRequest, ConsensusVote, Position};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// One scripted answer; `None` makes the call fail
pub type Step<T> = Option<T>;

/// Agent that replays scripted positions, votes and analyses in order.
pub struct ScriptedAgent {
    id: AgentId,
    positions: Mutex<VecDeque<Step<(String, f64)>>>,
    votes: Mutex<VecDeque<Step<bool>>>,
    analyses: Mutex<VecDeque<Step<(String, f64, bool)>>>,
    pub position_calls: AtomicUsize,
    pub vote_calls: AtomicUsize,
    pub seen_requests: Mutex<Vec<AnalysisRequest>>,
}

impl ScriptedAgent {
    pub fn new(id: &str) -> Self {
        Self {
            id: AgentId::new(id),
            positions: Mutex::new(VecDeque::new()),
            votes: Mutex::new(VecDeque::new()),
            analyses: Mutex::new(VecDeque::new()),
            position_calls: AtomicUsize::new(0),
            vote_calls: AtomicUsize::new(0),
            seen_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn positions(self, steps: &[Step<(&str, f64)>]) -> Self {
        *self.positions.lock() = steps
            .iter()
            .map(|s| s.map(|(stance, c)| (stance.to_string(), c)))
            .collect();
        self
    }

    pub fn votes(self, steps: &[Step<bool>]) -> Self {
        *self.votes.lock() = steps.iter().copied().collect();
        self
    }

    /// `(summary, confidence, should_escalate)` per analyze call
    pub fn analyses(self, steps: &[Step<(&str, f64, bool)>]) -> Self {
        *self.analyses.lock() = steps
            .iter()
            .map(|s| s.map(|(summary, c, e)| (summary.to_string(), c, e)))
            .collect();
        self
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    fn next_position(&self) -> Result<Position, InferenceError> {
        self.position_calls.fetch_add(1, Ordering::SeqCst);
        match self.positions.lock().pop_front().flatten() {
            Some((stance, confidence)) => Ok(Position::new(self.id.clone(), stance, confidence)
                .with_arguments(vec![format!("{} argument", self.id)])),
            None => Err(InferenceError::Malformed("scripted failure".to_string())),
        }
    }
}

#[async_trait]
impl DeliberativeAgent for ScriptedAgent {
    fn id(&self) -> &AgentId {
        &self.id
    }

    async fn state_position(&self, _topic: &str) -> Result<Position, InferenceError> {
        self.next_position()
    }

    async fn respond_to_positions(
        &self,
        _topic: &str,
        _prior: &[Position],
        _round: usize,
    ) -> Result<Position, InferenceError> {
        self.next_position()
    }

    async fn evaluate_consensus(
        &self,
        _topic: &str,
        _positions: &[Position],
    ) -> Result<ConsensusVote, InferenceError> {
        self.vote_calls.fetch_add(1, Ordering::SeqCst);
        match self.votes.lock().pop_front().flatten() {
            Some(true) => Ok(ConsensusVote::agree(self.id.clone(), "agrees")),
            Some(false) => Ok(ConsensusVote::disagree(self.id.clone(), "not convinced")),
            None => Err(InferenceError::Malformed("scripted failure".to_string())),
        }
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<AgentAnalysis, InferenceError> {
        self.seen_requests.lock().push(request.clone());
        match self.analyses.lock().pop_front().flatten() {
            Some((summary, confidence, escalate)) => Ok(AgentAnalysis {
                agent: self.id.clone(),
                phase: request.phase,
                succeeded: true,
                summary,
                findings: vec![format!("{} finding", self.id)],
                evidence: vec![format!("{} evidence", self.id)],
                confidence,
                should_escalate: escalate,
                next_actions: vec![format!("{} next", self.id)],
                error: None,
            }),
            None => Err(InferenceError::Malformed("scripted failure".to_string())),
        }
    }
}

/// Upcast a list of scripted agents for use case inputs
pub fn panel(agents: &[Arc<ScriptedAgent>]) -> Vec<Arc<dyn DeliberativeAgent>> {
    agents
        .iter()
        .map(|a| Arc::clone(a) as Arc<dyn DeliberativeAgent>)
        .collect()
}
