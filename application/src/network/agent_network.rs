//! Concurrency-safe registry shared by the coordinator and orchestrator.

use super::error::NetworkError;
use crate::agents::DeliberativeAgent;
use crate::use_cases::fan_out::fan_out;
use chrono::Utc;
use panel_domain::{
    AgentId, AgentMessage, AgentRole, AgentStatus, CollaborativeDecision, Impact, Insight,
    InsightKind, Memory, MessageKind,
};
use parking_lot::RwLock;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info};

/// Default number of insights and messages kept in each log
pub const DEFAULT_LOG_CAPACITY: usize = 1000;

const SUBSCRIBER_BUFFER: usize = 64;

#[derive(Default)]
struct NetworkState {
    insights: VecDeque<Insight>,
    communications: VecDeque<AgentMessage>,
    memories: HashMap<String, Vec<Memory>>,
    statuses: HashMap<AgentId, AgentStatus>,
    decisions: VecDeque<CollaborativeDecision>,
}

/// Registry of everything agents share.
///
/// Writers take the state lock for the duration of one mutation; readers
/// get cloned snapshots. No lock is held across an `.await` or across
/// caller code.
pub struct AgentNetwork {
    state: RwLock<NetworkState>,
    subscribers: RwLock<HashMap<AgentId, broadcast::Sender<Insight>>>,
    capacity: usize,
}

impl Default for AgentNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentNetwork {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }

    /// Network whose insight, communication and decision logs keep the
    /// last `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            state: RwLock::new(NetworkState::default()),
            subscribers: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // ==================== Statuses ====================

    /// Register an agent as idle; re-registering keeps existing stats
    pub fn register_agent(&self, agent: AgentId, expertise_tags: Vec<String>) {
        let mut state = self.state.write();
        state
            .statuses
            .entry(agent.clone())
            .or_insert_with(|| AgentStatus::idle(agent, expertise_tags));
    }

    /// Register the role's default agent with its expertise tags
    pub fn register_role(&self, role: AgentRole) {
        self.register_agent(
            role.id(),
            role.expertise().iter().map(|t| t.to_string()).collect(),
        );
    }

    /// Mark `agent` busy with `task`.
    pub fn start_task(&self, agent: &AgentId, task: impl Into<String>) -> Result<(), NetworkError> {
        let mut state = self.state.write();
        let status = state
            .statuses
            .get_mut(agent)
            .ok_or_else(|| NetworkError::UnknownAgent(agent.clone()))?;

        if status.busy {
            return Err(NetworkError::AgentBusy {
                agent: agent.clone(),
                task: status.current_task.clone().unwrap_or_default(),
            });
        }

        status.busy = true;
        status.current_task = Some(task.into());
        status.last_active_at = Utc::now();
        Ok(())
    }

    /// Mark `agent` idle again and record how the task went.
    pub fn finish_task(
        &self,
        agent: &AgentId,
        success: bool,
        confidence: Option<f64>,
    ) -> Result<(), NetworkError> {
        let mut state = self.state.write();
        let status = state
            .statuses
            .get_mut(agent)
            .ok_or_else(|| NetworkError::UnknownAgent(agent.clone()))?;

        status.busy = false;
        status.current_task = None;
        status.last_active_at = Utc::now();
        status.performance.record(success, confidence);
        Ok(())
    }

    /// `Some(task)` starts a task, `None` completes the current one
    pub fn update_status(&self, agent: &AgentId, task: Option<&str>) -> Result<(), NetworkError> {
        match task {
            Some(task) => self.start_task(agent, task),
            None => self.finish_task(agent, true, None),
        }
    }

    pub fn status(&self, agent: &AgentId) -> Option<AgentStatus> {
        self.state.read().statuses.get(agent).cloned()
    }

    /// Snapshot of every registered agent, sorted by id
    pub fn statuses(&self) -> Vec<AgentStatus> {
        let mut statuses: Vec<_> = self.state.read().statuses.values().cloned().collect();
        statuses.sort_by(|a, b| a.agent_id.cmp(&b.agent_id));
        statuses
    }

    /// Unregistered agents are not tracked and count as available
    pub fn is_available(&self, agent: &AgentId) -> bool {
        self.state
            .read()
            .statuses
            .get(agent)
            .is_none_or(AgentStatus::is_available)
    }

    // ==================== Insights ====================

    /// Receive every insight whose kind routes to `agent`
    pub fn subscribe(&self, agent: &AgentId) -> broadcast::Receiver<Insight> {
        let mut subscribers = self.subscribers.write();
        subscribers
            .entry(agent.clone())
            .or_insert_with(|| broadcast::channel(SUBSCRIBER_BUFFER).0)
            .subscribe()
    }

    /// Record an insight and route alerts for high-impact ones.
    ///
    /// Returns the alert messages that were appended to the communication
    /// log.
    pub fn broadcast(&self, insight: Insight) -> Vec<AgentMessage> {
        let alerts: Vec<AgentMessage> = insight
            .alert_recipients()
            .into_iter()
            .map(|to| {
                AgentMessage::new(
                    insight.agent.clone(),
                    to,
                    MessageKind::Alert,
                    format!("[{}/{}] {}", insight.kind, insight.impact, insight.content),
                )
            })
            .collect();

        debug!(
            "{} broadcast {} insight ({} alerts)",
            insight.agent,
            insight.kind,
            alerts.len()
        );

        {
            let mut state = self.state.write();
            push_bounded(&mut state.insights, insight.clone(), self.capacity);
            for alert in &alerts {
                push_bounded(&mut state.communications, alert.clone(), self.capacity);
            }
        }

        let subscribers = self.subscribers.read();
        for role in insight.kind.relevant_agents() {
            if let Some(sender) = subscribers.get(&role.id()) {
                // No live receivers is not an error
                let _ = sender.send(insight.clone());
            }
        }

        alerts
    }

    /// The whole insight log, oldest first
    pub fn history(&self) -> Vec<Insight> {
        self.state.read().insights.iter().cloned().collect()
    }

    /// The last `limit` insights, oldest first
    pub fn recent_insights(&self, limit: usize) -> Vec<Insight> {
        let state = self.state.read();
        let skip = state.insights.len().saturating_sub(limit);
        state.insights.iter().skip(skip).cloned().collect()
    }

    // ==================== Communications ====================

    pub fn send_message(&self, message: AgentMessage) {
        let mut state = self.state.write();
        push_bounded(&mut state.communications, message, self.capacity);
    }

    /// Communication log, optionally restricted to messages involving one agent
    pub fn communications(&self, agent: Option<&AgentId>) -> Vec<AgentMessage> {
        self.state
            .read()
            .communications
            .iter()
            .filter(|m| agent.is_none_or(|a| m.involves(a)))
            .cloned()
            .collect()
    }

    // ==================== Memories ====================

    /// Store a case memory; a successful resolution also yields a pattern
    /// insight from the pattern analyst.
    pub fn record_memory(&self, memory: Memory) -> Option<Insight> {
        let derived = memory.is_success().then(|| {
            Insight::new(
                AgentRole::PatternAnalyst.id(),
                InsightKind::Pattern,
                format!("Successful resolution pattern: {}", memory.summary()),
                Impact::High,
            )
            .with_confidence(0.8)
            .with_evidence(memory.learnings.clone())
            .with_related_data(serde_json::json!({
                "case_id": memory.case_id,
                "subject_id": memory.subject_id,
            }))
        });

        self.state
            .write()
            .memories
            .entry(memory.subject_id.clone())
            .or_default()
            .push(memory);

        if let Some(insight) = &derived {
            self.broadcast(insight.clone());
        }
        derived
    }

    /// Memories recorded for `subject`, oldest first
    pub fn memories_for(&self, subject: &str) -> Vec<Memory> {
        self.state
            .read()
            .memories
            .get(subject)
            .cloned()
            .unwrap_or_default()
    }

    // ==================== Decisions ====================

    /// Ask every participant for a candidate position on `topic`.
    ///
    /// Each participant first gets a decision-request message; participants
    /// whose call fails are recorded as absent. The decision is stored
    /// unscored; see [`CollaborativeDecision::evaluate`].
    pub async fn initiate_collaborative_decision(
        &self,
        initiator: &AgentId,
        topic: &str,
        participants: &[Arc<dyn DeliberativeAgent>],
    ) -> CollaborativeDecision {
        info!(
            "{} opened a collaborative decision with {} participants",
            initiator,
            participants.len()
        );

        for agent in participants {
            self.send_message(AgentMessage::new(
                initiator.clone(),
                agent.id().clone(),
                MessageKind::DecisionRequest,
                topic,
            ));
        }

        let topic_owned = topic.to_string();
        let gathered = fan_out(participants, |agent| {
            let topic = topic_owned.clone();
            async move { agent.state_position(&topic).await }
        })
        .await;
        let (candidates, absent) = gathered.into_successes("collaborative decision");

        let decision = CollaborativeDecision::new(
            initiator.clone(),
            topic,
            participants.iter().map(|a| a.id().clone()).collect(),
            candidates,
            absent,
        );
        push_bounded(&mut self.state.write().decisions, decision.clone(), self.capacity);
        decision
    }

    /// Stored decisions, oldest first
    pub fn decisions(&self) -> Vec<CollaborativeDecision> {
        self.state.read().decisions.iter().cloned().collect()
    }
}

fn push_bounded<T>(log: &mut VecDeque<T>, entry: T, capacity: usize) {
    while log.len() >= capacity {
        log.pop_front();
    }
    log.push_back(entry);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::InferenceError;
    use async_trait::async_trait;
    use tokio::task::JoinSet;
    use panel_domain::{
        AgentAnalysis, AnalysisRequest, CaseOutcome, ConsensusBuilder, ConsensusVote, Position,
    };

    struct FixedAgent {
        id: AgentId,
        stance: Option<&'static str>,
    }

    impl FixedAgent {
        fn new(id: &str, stance: Option<&'static str>) -> Arc<dyn DeliberativeAgent> {
            Arc::new(Self {
                id: AgentId::new(id),
                stance,
            })
        }
    }

    #[async_trait]
    impl DeliberativeAgent for FixedAgent {
        fn id(&self) -> &AgentId {
            &self.id
        }

        async fn state_position(&self, _topic: &str) -> Result<Position, InferenceError> {
            match self.stance {
                Some(stance) => Ok(Position::new(self.id.clone(), stance, 0.8)),
                None => Err(InferenceError::Malformed("no stance".to_string())),
            }
        }

        async fn respond_to_positions(
            &self,
            topic: &str,
            _prior: &[Position],
            _round: usize,
        ) -> Result<Position, InferenceError> {
            self.state_position(topic).await
        }

        async fn evaluate_consensus(
            &self,
            _topic: &str,
            _positions: &[Position],
        ) -> Result<ConsensusVote, InferenceError> {
            Ok(ConsensusVote::agree(self.id.clone(), "fine"))
        }

        async fn analyze(
            &self,
            request: &AnalysisRequest,
        ) -> Result<AgentAnalysis, InferenceError> {
            Ok(AgentAnalysis::failure(self.id.clone(), request.phase, "unused"))
        }
    }

    #[test]
    fn test_critical_anomaly_alerts_two_agents() {
        let network = AgentNetwork::new();
        let insight = Insight::new(
            "CustomerInsightAgent",
            InsightKind::Anomaly,
            "chargeback spike",
            Impact::Critical,
        );

        let alerts = network.broadcast(insight);

        let mut recipients: Vec<_> = alerts.iter().map(|m| m.to.clone()).collect();
        recipients.sort();
        assert_eq!(
            recipients,
            vec![AgentId::new("ComplianceGuardian"), AgentId::new("PatternAnalyst")]
        );
        assert!(alerts
            .iter()
            .all(|m| m.from == AgentId::new("CustomerInsightAgent") && m.kind == MessageKind::Alert));
        assert_eq!(network.communications(None).len(), 2);
        assert_eq!(network.history().len(), 1);
    }

    #[test]
    fn test_low_impact_and_recommendations_send_no_alerts() {
        let network = AgentNetwork::new();
        network.broadcast(Insight::new("a", InsightKind::Warning, "minor", Impact::Medium));
        network.broadcast(Insight::new(
            "a",
            InsightKind::Recommendation,
            "do it",
            Impact::Critical,
        ));
        assert!(network.communications(None).is_empty());
        assert_eq!(network.history().len(), 2);
    }

    #[test]
    fn test_logs_are_bounded() {
        let network = AgentNetwork::with_capacity(3);
        for i in 0..5 {
            network.broadcast(Insight::new(
                "a",
                InsightKind::Pattern,
                format!("p{i}"),
                Impact::High,
            ));
        }
        let history = network.history();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].content, "p2");
        assert_eq!(network.communications(None).len(), 3);
        assert_eq!(network.recent_insights(2).len(), 2);
        assert_eq!(network.recent_insights(2)[1].content, "p4");
    }

    #[test]
    fn test_communications_filter() {
        let network = AgentNetwork::new();
        network.send_message(AgentMessage::new("a", "b", MessageKind::Note, "hi"));
        network.send_message(AgentMessage::new("c", "d", MessageKind::Note, "yo"));

        assert_eq!(network.communications(Some(&AgentId::new("b"))).len(), 1);
        assert!(network.communications(Some(&AgentId::new("z"))).is_empty());
    }

    #[tokio::test]
    async fn test_subscribers_receive_routed_insights() {
        let network = AgentNetwork::new();
        let mut architect = network.subscribe(&AgentRole::SolutionArchitect.id());
        let mut guardian = network.subscribe(&AgentRole::ComplianceGuardian.id());

        network.broadcast(Insight::new("a", InsightKind::Pattern, "p", Impact::Low));

        assert_eq!(architect.recv().await.unwrap().content, "p");
        assert!(guardian.try_recv().is_err());
    }

    #[test]
    fn test_memories_are_per_subject_and_success_derives_pattern() {
        let network = AgentNetwork::new();

        let derived = network.record_memory(
            Memory::new("T-1", "cust-1", "double charge", "refund", CaseOutcome::Resolved)
                .with_satisfaction(5),
        );
        let none = network.record_memory(
            Memory::new("T-2", "cust-2", "slow app", "wait", CaseOutcome::Resolved)
                .with_satisfaction(2),
        );

        assert!(none.is_none());
        let derived = derived.unwrap();
        assert_eq!(derived.kind, InsightKind::Pattern);
        assert_eq!(derived.impact, Impact::High);
        assert_eq!(derived.agent, AgentRole::PatternAnalyst.id());

        assert_eq!(network.memories_for("cust-1").len(), 1);
        assert_eq!(network.memories_for("cust-2").len(), 1);
        assert!(network.memories_for("cust-3").is_empty());
        // pattern alert goes to SolutionArchitect and ProactiveAgent
        assert_eq!(network.communications(None).len(), 2);
    }

    #[test]
    fn test_status_transitions() {
        let network = AgentNetwork::new();
        let id = AgentRole::PatternAnalyst.id();
        network.register_role(AgentRole::PatternAnalyst);
        let before = network.status(&id).unwrap().last_active_at;

        network.start_task(&id, "T-1").unwrap();
        assert!(!network.is_available(&id));
        let err = network.start_task(&id, "T-2").unwrap_err();
        assert_eq!(
            err,
            NetworkError::AgentBusy {
                agent: id.clone(),
                task: "T-1".to_string()
            }
        );

        network.finish_task(&id, true, Some(0.9)).unwrap();
        let status = network.status(&id).unwrap();
        assert!(status.is_available());
        assert!(status.current_task.is_none());
        assert!(status.last_active_at >= before);
        assert_eq!(status.performance.tasks_completed, 1);

        network.update_status(&id, Some("T-3")).unwrap();
        network.update_status(&id, None).unwrap();
        assert_eq!(network.status(&id).unwrap().performance.tasks_completed, 2);
    }

    #[test]
    fn test_unknown_agent() {
        let network = AgentNetwork::new();
        let ghost = AgentId::new("ghost");
        assert!(network.is_available(&ghost));
        assert_eq!(
            network.start_task(&ghost, "x").unwrap_err(),
            NetworkError::UnknownAgent(ghost)
        );
    }

    #[tokio::test]
    async fn test_collaborative_decision_records_absent_participants() {
        let network = AgentNetwork::new();
        let participants = vec![
            FixedAgent::new("a", Some("refund")),
            FixedAgent::new("b", Some("Refund!")),
            FixedAgent::new("c", None),
        ];

        let decision = network
            .initiate_collaborative_decision(&AgentId::new("a"), "T-1 refund?", &participants)
            .await;

        assert_eq!(decision.candidates.len(), 2);
        assert_eq!(decision.absent, vec![AgentId::new("c")]);
        assert_eq!(network.decisions().len(), 1);
        let requests = network.communications(None);
        assert_eq!(requests.len(), 3);
        assert!(requests.iter().all(|m| m.kind == MessageKind::DecisionRequest));

        let result = decision.evaluate(&ConsensusBuilder::new());
        assert!(result.reached);
        assert_eq!(result.selected.unwrap().supporting_agents.len(), 2);
    }

    #[tokio::test]
    async fn test_decision_log_is_bounded() {
        let network = AgentNetwork::with_capacity(2);
        let participants = vec![FixedAgent::new("a", Some("refund"))];

        for topic in ["first", "second", "third"] {
            network
                .initiate_collaborative_decision(&AgentId::new("a"), topic, &participants)
                .await;
        }

        let topics: Vec<_> = network.decisions().into_iter().map(|d| d.topic).collect();
        assert_eq!(topics, vec!["second".to_string(), "third".to_string()]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writers_and_readers() {
        const CAPACITY: usize = 100;
        const INSIGHTS: usize = 200;
        const SUBJECTS: usize = 10;
        const MEMORIES_PER_SUBJECT: usize = 20;
        const AGENTS: usize = 8;
        const TASKS_PER_AGENT: u64 = 50;

        let network = Arc::new(AgentNetwork::with_capacity(CAPACITY));
        for a in 0..AGENTS {
            network.register_agent(AgentId::new(format!("agent-{a}")), vec![]);
        }

        let mut tasks = JoinSet::new();

        for i in 0..INSIGHTS {
            let network = Arc::clone(&network);
            tasks.spawn(async move {
                let alerts = network.broadcast(Insight::new(
                    "CustomerInsightAgent",
                    InsightKind::Anomaly,
                    format!("anomaly {i}"),
                    Impact::High,
                ));
                assert_eq!(alerts.len(), 2);
            });
        }

        for s in 0..SUBJECTS {
            for m in 0..MEMORIES_PER_SUBJECT {
                let network = Arc::clone(&network);
                tasks.spawn(async move {
                    // Low satisfaction keeps the insight log free of derived patterns
                    let derived = network.record_memory(
                        Memory::new(
                            format!("T-{s}-{m}"),
                            format!("cust-{s}"),
                            "issue",
                            "fix",
                            CaseOutcome::Resolved,
                        )
                        .with_satisfaction(2),
                    );
                    assert!(derived.is_none());
                });
            }
        }

        for a in 0..AGENTS {
            let network = Arc::clone(&network);
            tasks.spawn(async move {
                let id = AgentId::new(format!("agent-{a}"));
                for t in 0..TASKS_PER_AGENT {
                    network.start_task(&id, format!("task-{t}")).unwrap();
                    tokio::task::yield_now().await;
                    network.finish_task(&id, true, Some(0.5)).unwrap();
                }
            });
        }

        for _ in 0..4 {
            let network = Arc::clone(&network);
            tasks.spawn(async move {
                for _ in 0..100 {
                    assert!(network.history().len() <= CAPACITY);
                    assert!(network.communications(None).len() <= CAPACITY);
                    assert!(network.statuses().len() == AGENTS);
                    tokio::task::yield_now().await;
                }
            });
        }

        while let Some(joined) = tasks.join_next().await {
            joined.unwrap();
        }

        assert_eq!(network.history().len(), CAPACITY);
        assert_eq!(network.communications(None).len(), CAPACITY);
        assert!(
            network
                .communications(None)
                .iter()
                .all(|m| m.kind == MessageKind::Alert)
        );
        for s in 0..SUBJECTS {
            assert_eq!(network.memories_for(&format!("cust-{s}")).len(), MEMORIES_PER_SUBJECT);
        }
        let statuses = network.statuses();
        assert_eq!(statuses.len(), AGENTS);
        for status in statuses {
            assert!(status.is_available());
            assert!(status.current_task.is_none());
            assert_eq!(status.performance.tasks_completed, TASKS_PER_AGENT);
        }
    }
}
