//! Insights broadcast between agents.

use crate::agent::{AgentId, AgentRole};
use crate::deliberation::clamp_confidence;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Pattern,
    Anomaly,
    Recommendation,
    Warning,
    Opportunity,
}

impl InsightKind {
    /// Roles that receive alerts for high-impact insights of this kind
    pub fn relevant_agents(&self) -> &'static [AgentRole] {
        match self {
            InsightKind::Pattern => &[AgentRole::SolutionArchitect, AgentRole::ProactiveAgent],
            InsightKind::Anomaly => &[AgentRole::PatternAnalyst, AgentRole::ComplianceGuardian],
            InsightKind::Warning => &[AgentRole::ProactiveAgent, AgentRole::ComplianceGuardian],
            InsightKind::Opportunity => {
                &[AgentRole::CustomerInsightAgent, AgentRole::SolutionArchitect]
            }
            InsightKind::Recommendation => &[],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Pattern => "pattern",
            InsightKind::Anomaly => "anomaly",
            InsightKind::Recommendation => "recommendation",
            InsightKind::Warning => "warning",
            InsightKind::Opportunity => "opportunity",
        }
    }
}

impl std::fmt::Display for InsightKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
    Critical,
}

impl Impact {
    /// High and critical insights trigger routed alerts
    pub fn is_alerting(&self) -> bool {
        matches!(self, Impact::High | Impact::Critical)
    }
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Impact::Low => "low",
            Impact::Medium => "medium",
            Impact::High => "high",
            Impact::Critical => "critical",
        };
        write!(f, "{s}")
    }
}

/// An observation one agent shares with the rest of the network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub id: Uuid,
    pub agent: AgentId,
    pub kind: InsightKind,
    pub content: String,
    pub confidence: f64,
    pub evidence: Vec<String>,
    pub impact: Impact,
    #[serde(default)]
    pub related_data: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl Insight {
    pub fn new(
        agent: impl Into<AgentId>,
        kind: InsightKind,
        content: impl Into<String>,
        impact: Impact,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            agent: agent.into(),
            kind,
            content: content.into(),
            confidence: 0.5,
            evidence: Vec::new(),
            impact,
            related_data: serde_json::Value::Null,
            timestamp: Utc::now(),
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = clamp_confidence(confidence);
        self
    }

    pub fn with_evidence(mut self, evidence: Vec<String>) -> Self {
        self.evidence = evidence;
        self
    }

    pub fn with_related_data(mut self, data: serde_json::Value) -> Self {
        self.related_data = data;
        self
    }

    /// Agents that should be alerted; empty below high impact
    pub fn alert_recipients(&self) -> Vec<AgentId> {
        if !self.impact.is_alerting() {
            return Vec::new();
        }
        self.kind.relevant_agents().iter().map(|r| r.id()).collect()
    }
}
