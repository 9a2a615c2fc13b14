//! Per-subject case memory.

use crate::agent::AgentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseOutcome {
    Resolved,
    Escalated,
    Pending,
}

/// Lowest satisfaction score (1-5) that counts as a success
pub const SUCCESS_SATISFACTION: u8 = 4;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryMetrics {
    /// Customer satisfaction on a 1-5 scale
    pub satisfaction: Option<u8>,
    pub resolution_minutes: Option<f64>,
    #[serde(default)]
    pub agents_involved: Vec<AgentId>,
}

/// Durable record of how a case for a subject ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    pub case_id: String,
    pub subject_id: String,
    pub issue: String,
    pub resolution: String,
    pub outcome: CaseOutcome,
    #[serde(default)]
    pub learnings: Vec<String>,
    #[serde(default)]
    pub metrics: MemoryMetrics,
    pub timestamp: DateTime<Utc>,
}

impl Memory {
    pub fn new(
        case_id: impl Into<String>,
        subject_id: impl Into<String>,
        issue: impl Into<String>,
        resolution: impl Into<String>,
        outcome: CaseOutcome,
    ) -> Self {
        Self {
            case_id: case_id.into(),
            subject_id: subject_id.into(),
            issue: issue.into(),
            resolution: resolution.into(),
            outcome,
            learnings: Vec::new(),
            metrics: MemoryMetrics::default(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_learnings(mut self, learnings: Vec<String>) -> Self {
        self.learnings = learnings;
        self
    }

    pub fn with_satisfaction(mut self, satisfaction: u8) -> Self {
        self.metrics.satisfaction = Some(satisfaction.clamp(1, 5));
        self
    }

    pub fn with_agents(mut self, agents: Vec<AgentId>) -> Self {
        self.metrics.agents_involved = agents;
        self
    }

    /// Resolved with satisfaction of at least 4
    pub fn is_success(&self) -> bool {
        self.outcome == CaseOutcome::Resolved
            && self
                .metrics
                .satisfaction
                .is_some_and(|s| s >= SUCCESS_SATISFACTION)
    }

    /// One-line summary used in prompts and derived insights
    pub fn summary(&self) -> String {
        format!(
            "[{}] {} -> {} ({:?})",
            self.case_id, self.issue, self.resolution, self.outcome
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success() {
        let base = Memory::new("c1", "cust-1", "login", "reset password", CaseOutcome::Resolved);
        assert!(!base.is_success());
        assert!(base.clone().with_satisfaction(4).is_success());
        assert!(!base.clone().with_satisfaction(3).is_success());

        let escalated = Memory::new("c2", "cust-1", "x", "y", CaseOutcome::Escalated)
            .with_satisfaction(5);
        assert!(!escalated.is_success());
    }

    #[test]
    fn test_satisfaction_clamped() {
        let memory = Memory::new("c", "s", "i", "r", CaseOutcome::Resolved).with_satisfaction(9);
        assert_eq!(memory.metrics.satisfaction, Some(5));
    }
}
