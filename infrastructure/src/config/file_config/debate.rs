//! Debate and consensus configuration from TOML (`[debate]`, `[consensus]`)
//!
//! ```toml
//! [debate]
//! max_rounds = 3
//! consensus_threshold = 0.75
//!
//! [consensus]
//! minimum_support = 0.67
//! ```

use panel_domain::DebateConfig;
use panel_domain::consensus::DEFAULT_MINIMUM_SUPPORT;
use serde::{Deserialize, Serialize};

/// Raw `[debate]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDebateConfig {
    /// Hard cap on rounds, including the initial one
    pub max_rounds: usize,
    /// Fraction of participants that must share a stance
    pub consensus_threshold: f64,
}

impl Default for FileDebateConfig {
    fn default() -> Self {
        let defaults = DebateConfig::default();
        Self {
            max_rounds: defaults.max_rounds,
            consensus_threshold: defaults.consensus_threshold,
        }
    }
}

impl FileDebateConfig {
    pub fn to_debate_config(&self) -> DebateConfig {
        DebateConfig::default()
            .with_max_rounds(self.max_rounds)
            .with_consensus_threshold(self.consensus_threshold)
    }
}

/// Raw `[consensus]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConsensusConfig {
    /// Support ratio an option needs to be selected
    pub minimum_support: f64,
}

impl Default for FileConsensusConfig {
    fn default() -> Self {
        Self {
            minimum_support: DEFAULT_MINIMUM_SUPPORT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::FileConfig;

    #[test]
    fn test_debate_section() {
        let toml_str = r#"
[debate]
max_rounds = 5
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let debate = config.debate.to_debate_config();
        assert_eq!(debate.max_rounds, 5);
        assert_eq!(debate.consensus_threshold, 0.75);
    }

    #[test]
    fn test_consensus_section() {
        let config: FileConfig = toml::from_str("[consensus]\nminimum_support = 0.5\n").unwrap();
        assert_eq!(config.consensus.minimum_support, 0.5);
    }
}
