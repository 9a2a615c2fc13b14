//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application config
//! types by [`FileConfig::to_orchestrator_config`].

mod debate;
mod issue;
mod logging;
mod network;
mod orchestrator;

pub use debate::{FileConsensusConfig, FileDebateConfig};
pub use issue::{ConfigIssue, Severity};
pub use logging::FileLoggingConfig;
pub use network::FileNetworkConfig;
pub use orchestrator::FileOrchestratorConfig;

use panel_application::OrchestratorConfig;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub debate: FileDebateConfig,
    pub consensus: FileConsensusConfig,
    pub orchestrator: FileOrchestratorConfig,
    pub network: FileNetworkConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Build the orchestrator config, collecting every issue found.
    ///
    /// Warnings fall back to defaults; any error-severity issue means the
    /// returned config must not be used.
    pub fn to_orchestrator_config(&self) -> (OrchestratorConfig, Vec<ConfigIssue>) {
        let (parallel_agents, mut issues) = self.orchestrator.parse_parallel_agents();

        let config = OrchestratorConfig {
            parallel_agents,
            escalation_threshold: self.orchestrator.escalation_threshold,
            minimum_support: self.consensus.minimum_support,
            temperature: self.orchestrator.temperature,
            enable_debate: self.orchestrator.enable_debate,
            debate: self.debate.to_debate_config(),
            agent_timeout: self.orchestrator.agent_timeout(),
        };

        if let Err(e) = config.validate() {
            issues.push(ConfigIssue::error(field_of(&e), e.to_string()));
        }
        if self.network.log_capacity == 0 {
            issues.push(ConfigIssue::warning(
                "network.log_capacity",
                "must be at least 1, using 1",
            ));
        }

        (config, issues)
    }

    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        self.to_orchestrator_config().1
    }
}

fn field_of(error: &panel_domain::DomainError) -> &'static str {
    use panel_domain::DomainError;
    match error {
        DomainError::InvalidThreshold { name: "escalation_threshold", .. } => {
            "orchestrator.escalation_threshold"
        }
        DomainError::InvalidThreshold { name: "minimum_support", .. } => "consensus.minimum_support",
        DomainError::InvalidThreshold { .. } => "debate.consensus_threshold",
        DomainError::InvalidMaxRounds => "debate.max_rounds",
        DomainError::NoParticipants => "orchestrator.parallel_agents",
        _ => "config",
    }
}
