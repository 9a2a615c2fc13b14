//! Role-backed agent adapter over an inference gateway.

use super::adapter::DeliberativeAgent;
use super::error::InferenceError;
use crate::ports::inference_gateway::{InferenceGateway, RawJudgment};
use async_trait::async_trait;
use panel_domain::deliberation::{parse_evaluation, parse_judgment};
use panel_domain::{
    AgentAnalysis, AgentId, AgentRole, AnalysisRequest, ConsensusVote, Position, PromptTemplate,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default sampling temperature for specialist calls
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// A panel specialist.
///
/// The role selects the system prompt; everything else (parsing, timeout
/// handling, error typing) is shared across roles.
pub struct SpecialistAgent<G: InferenceGateway + 'static> {
    id: AgentId,
    role: AgentRole,
    gateway: Arc<G>,
    temperature: f32,
    timeout: Option<Duration>,
}

impl<G: InferenceGateway + 'static> SpecialistAgent<G> {
    pub fn new(role: AgentRole, gateway: Arc<G>) -> Self {
        Self {
            id: role.id(),
            role,
            gateway,
            temperature: DEFAULT_TEMPERATURE,
            timeout: None,
        }
    }

    /// Seat the agent under a different id (e.g. two analysts of one role)
    pub fn with_id(mut self, id: impl Into<AgentId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Treat calls slower than `timeout` as failed
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    async fn call(&self, user_context: String) -> Result<RawJudgment, InferenceError> {
        let system = PromptTemplate::system(self.role);
        let request = self.gateway.analyze(&system, &user_context, self.temperature);

        let raw = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .map_err(|_| InferenceError::Timeout(limit))??,
            None => request.await?,
        };
        debug!("{} answered ({} chars)", self.id, raw.text.len());
        Ok(raw)
    }

    async fn position(&self, user_context: String) -> Result<Position, InferenceError> {
        let raw = self.call(user_context).await?;
        let judgment = parse_judgment(&raw.text, raw.confidence)?;
        Ok(Position::new(self.id.clone(), judgment.stance, judgment.confidence)
            .with_arguments(judgment.arguments)
            .with_evidence(judgment.evidence))
    }
}

#[async_trait]
impl<G: InferenceGateway + 'static> DeliberativeAgent for SpecialistAgent<G> {
    fn id(&self) -> &AgentId {
        &self.id
    }

    fn role(&self) -> Option<AgentRole> {
        Some(self.role)
    }

    async fn state_position(&self, topic: &str) -> Result<Position, InferenceError> {
        self.position(PromptTemplate::state_position(topic)).await
    }

    async fn respond_to_positions(
        &self,
        topic: &str,
        prior: &[Position],
        round: usize,
    ) -> Result<Position, InferenceError> {
        self.position(PromptTemplate::respond_to_positions(topic, prior, round))
            .await
    }

    async fn evaluate_consensus(
        &self,
        topic: &str,
        positions: &[Position],
    ) -> Result<ConsensusVote, InferenceError> {
        let raw = self
            .call(PromptTemplate::evaluate_consensus(topic, positions))
            .await?;
        let (agrees, reason) = parse_evaluation(&raw.text)?;
        Ok(ConsensusVote {
            agent: self.id.clone(),
            agrees,
            reason,
        })
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<AgentAnalysis, InferenceError> {
        let raw = self.call(PromptTemplate::analyze(request)).await?;
        let judgment = parse_judgment(&raw.text, raw.confidence)?;
        Ok(AgentAnalysis::from_judgment(
            self.id.clone(),
            request.phase,
            judgment,
        ))
    }
}
