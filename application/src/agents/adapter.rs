//! Agent adapter capability.

use super::error::InferenceError;
use async_trait::async_trait;
use panel_domain::{AgentAnalysis, AgentId, AgentRole, AnalysisRequest, ConsensusVote, Position};

/// What the debate coordinator and the orchestrator can ask of an agent.
///
/// Every call either returns a complete value or an [`InferenceError`];
/// nothing is shared between calls except what is passed in.
#[async_trait]
pub trait DeliberativeAgent: Send + Sync {
    fn id(&self) -> &AgentId;

    /// Specialist role, if the agent is role-backed
    fn role(&self) -> Option<AgentRole> {
        None
    }

    /// Independent initial position on `topic`
    async fn state_position(&self, topic: &str) -> Result<Position, InferenceError>;

    /// Revised position after reading the previous round
    async fn respond_to_positions(
        &self,
        topic: &str,
        prior: &[Position],
        round: usize,
    ) -> Result<Position, InferenceError>;

    /// Whether the agent accepts the most widely held final position
    async fn evaluate_consensus(
        &self,
        topic: &str,
        positions: &[Position],
    ) -> Result<ConsensusVote, InferenceError>;

    /// Analysis of a case for an orchestrated phase
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AgentAnalysis, InferenceError>;
}
