//! Agent identity: the closed set of specialist roles and the id used to
//! address an agent in positions, messages and status records.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Identifier of a panel participant.
///
/// Role-backed agents use the role name (`"PatternAnalyst"`), but any
/// string is accepted so the same panel can seat several agents per role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(String);

impl AgentId {
    /// Creates an AgentId from an existing string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AgentId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AgentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&String> for AgentId {
    fn from(s: &String) -> Self {
        Self::new(s.as_str())
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Specialist roles that can sit on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentRole {
    /// Reads the customer's history, sentiment and intent
    CustomerInsightAgent,
    /// Looks for recurring issues and anomalies across cases
    PatternAnalyst,
    /// Checks policy, regulatory and contractual constraints
    ComplianceGuardian,
    /// Turns the collected analyses into a concrete resolution
    SolutionArchitect,
    /// Plans follow-up and prevention once a resolution exists
    ProactiveAgent,
}

impl AgentRole {
    pub const ALL: [AgentRole; 5] = [
        AgentRole::CustomerInsightAgent,
        AgentRole::PatternAnalyst,
        AgentRole::ComplianceGuardian,
        AgentRole::SolutionArchitect,
        AgentRole::ProactiveAgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentRole::CustomerInsightAgent => "CustomerInsightAgent",
            AgentRole::PatternAnalyst => "PatternAnalyst",
            AgentRole::ComplianceGuardian => "ComplianceGuardian",
            AgentRole::SolutionArchitect => "SolutionArchitect",
            AgentRole::ProactiveAgent => "ProactiveAgent",
        }
    }

    /// Default agent id for a role-backed agent
    pub fn id(&self) -> AgentId {
        AgentId::new(self.as_str())
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AgentRole::CustomerInsightAgent => "Customer Insight",
            AgentRole::PatternAnalyst => "Pattern Analyst",
            AgentRole::ComplianceGuardian => "Compliance Guardian",
            AgentRole::SolutionArchitect => "Solution Architect",
            AgentRole::ProactiveAgent => "Proactive Planner",
        }
    }

    /// Expertise tags registered in the agent status table
    pub fn expertise(&self) -> &'static [&'static str] {
        match self {
            AgentRole::CustomerInsightAgent => &["sentiment", "customer-history", "intent"],
            AgentRole::PatternAnalyst => &["trends", "anomalies", "root-cause"],
            AgentRole::ComplianceGuardian => &["policy", "regulation", "risk"],
            AgentRole::SolutionArchitect => &["resolution", "workarounds", "technical"],
            AgentRole::ProactiveAgent => &["follow-up", "prevention", "retention"],
        }
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AgentRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "customerinsightagent" | "customerinsight" | "customer" => {
                Ok(AgentRole::CustomerInsightAgent)
            }
            "patternanalyst" | "pattern" => Ok(AgentRole::PatternAnalyst),
            "complianceguardian" | "compliance" => Ok(AgentRole::ComplianceGuardian),
            "solutionarchitect" | "solution" => Ok(AgentRole::SolutionArchitect),
            "proactiveagent" | "proactive" => Ok(AgentRole::ProactiveAgent),
            _ => Err(DomainError::UnknownRole(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_id() {
        for role in AgentRole::ALL {
            let parsed: AgentRole = role.id().as_str().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_role_parse_aliases() {
        assert_eq!(
            "pattern-analyst".parse::<AgentRole>().unwrap(),
            AgentRole::PatternAnalyst
        );
        assert_eq!(
            "Compliance".parse::<AgentRole>().unwrap(),
            AgentRole::ComplianceGuardian
        );
        assert!("janitor".parse::<AgentRole>().is_err());
    }

    #[test]
    fn test_agent_id_ordering() {
        let mut ids = vec![AgentId::new("c"), AgentId::new("a"), AgentId::new("b")];
        ids.sort();
        assert_eq!(ids, vec![AgentId::new("a"), AgentId::new("b"), AgentId::new("c")]);
    }
}
