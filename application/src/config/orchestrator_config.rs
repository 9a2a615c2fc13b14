//! Orchestrator parameters: use case behavior, not domain policy.

use crate::agents::DEFAULT_TEMPERATURE;
use panel_domain::consensus::builder::DEFAULT_MINIMUM_SUPPORT;
use panel_domain::core::error::validate_threshold;
use panel_domain::{AgentRole, DebateConfig, DomainError};
use std::time::Duration;

/// Overall confidence below which a result is escalated
pub const DEFAULT_ESCALATION_THRESHOLD: f64 = 0.6;

/// Confidence at which a successful analysis is broadcast as a recommendation
pub const RECOMMENDATION_CONFIDENCE: f64 = 0.8;

/// Deliberation orchestrator parameters.
///
/// | Field | Default |
/// |-------|---------|
/// | `parallel_agents` | CustomerInsightAgent, PatternAnalyst, ComplianceGuardian |
/// | `escalation_threshold` | 0.6 |
/// | `minimum_support` | 2/3 |
/// | `enable_debate` | false |
/// | `debate` | 3 rounds, threshold 0.75 |
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Agents run concurrently in the analysis phase
    pub parallel_agents: Vec<AgentRole>,
    pub escalation_threshold: f64,
    pub minimum_support: f64,
    pub temperature: f32,
    /// Run a debate when analysis-phase stances diverge
    pub enable_debate: bool,
    pub debate: DebateConfig,
    /// Per-call timeout applied by agent adapters
    pub agent_timeout: Option<Duration>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            parallel_agents: vec![
                AgentRole::CustomerInsightAgent,
                AgentRole::PatternAnalyst,
                AgentRole::ComplianceGuardian,
            ],
            escalation_threshold: DEFAULT_ESCALATION_THRESHOLD,
            minimum_support: DEFAULT_MINIMUM_SUPPORT,
            temperature: DEFAULT_TEMPERATURE,
            enable_debate: false,
            debate: DebateConfig::default(),
            agent_timeout: None,
        }
    }
}

impl OrchestratorConfig {
    // ==================== Builder Methods ====================

    pub fn with_parallel_agents(mut self, agents: Vec<AgentRole>) -> Self {
        self.parallel_agents = agents;
        self
    }

    pub fn with_escalation_threshold(mut self, threshold: f64) -> Self {
        self.escalation_threshold = threshold;
        self
    }

    pub fn with_minimum_support(mut self, support: f64) -> Self {
        self.minimum_support = support;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_debate(mut self, debate: DebateConfig) -> Self {
        self.enable_debate = true;
        self.debate = debate;
        self
    }

    pub fn with_agent_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.agent_timeout = timeout;
        self
    }

    /// Reject thresholds outside (0, 1], an empty analysis phase and an
    /// invalid debate configuration.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.parallel_agents.is_empty() {
            return Err(DomainError::NoParticipants);
        }
        validate_threshold("escalation_threshold", self.escalation_threshold)?;
        validate_threshold("minimum_support", self.minimum_support)?;
        self.debate.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = OrchestratorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.parallel_agents.len(), 3);
        assert!(!config.enable_debate);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let config = OrchestratorConfig::default().with_escalation_threshold(0.0);
        assert!(matches!(
            config.validate(),
            Err(DomainError::InvalidThreshold { name: "escalation_threshold", .. })
        ));

        let config = OrchestratorConfig::default().with_parallel_agents(vec![]);
        assert_eq!(config.validate(), Err(DomainError::NoParticipants));

        let config =
            OrchestratorConfig::default().with_debate(DebateConfig::default().with_max_rounds(0));
        assert_eq!(config.validate(), Err(DomainError::InvalidMaxRounds));
    }
}
