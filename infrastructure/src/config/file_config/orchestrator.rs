//! Orchestrator configuration from TOML (`[orchestrator]` section)

use super::issue::ConfigIssue;
use panel_application::agents::DEFAULT_TEMPERATURE;
use panel_application::config::DEFAULT_ESCALATION_THRESHOLD;
use panel_domain::AgentRole;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw orchestrator configuration from TOML
///
/// # Example
///
/// ```toml
/// [orchestrator]
/// parallel_agents = ["CustomerInsightAgent", "PatternAnalyst", "ComplianceGuardian"]
/// escalation_threshold = 0.6
/// temperature = 0.3
/// enable_debate = true
/// agent_timeout_secs = 60
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOrchestratorConfig {
    /// Role names run in the parallel analysis phase
    pub parallel_agents: Vec<String>,
    pub escalation_threshold: f64,
    pub temperature: f32,
    pub enable_debate: bool,
    /// Per-call agent timeout; unset means no timeout
    pub agent_timeout_secs: Option<u64>,
}

impl Default for FileOrchestratorConfig {
    fn default() -> Self {
        Self {
            parallel_agents: vec![
                AgentRole::CustomerInsightAgent.as_str().to_string(),
                AgentRole::PatternAnalyst.as_str().to_string(),
                AgentRole::ComplianceGuardian.as_str().to_string(),
            ],
            escalation_threshold: DEFAULT_ESCALATION_THRESHOLD,
            temperature: DEFAULT_TEMPERATURE,
            enable_debate: false,
            agent_timeout_secs: None,
        }
    }
}

impl FileOrchestratorConfig {
    /// Parse role names, skipping unknown ones with a warning.
    pub fn parse_parallel_agents(&self) -> (Vec<AgentRole>, Vec<ConfigIssue>) {
        let mut roles = Vec::new();
        let mut issues = Vec::new();
        for name in &self.parallel_agents {
            match name.parse::<AgentRole>() {
                Ok(role) if roles.contains(&role) => issues.push(ConfigIssue::warning(
                    "orchestrator.parallel_agents",
                    format!("'{name}' is listed twice"),
                )),
                Ok(role) => roles.push(role),
                Err(e) => issues.push(ConfigIssue::warning(
                    "orchestrator.parallel_agents",
                    format!("{e}, ignoring"),
                )),
            }
        }
        (roles, issues)
    }

    pub fn agent_timeout(&self) -> Option<Duration> {
        self.agent_timeout_secs.map(Duration::from_secs)
    }
}
