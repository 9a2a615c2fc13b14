//! Debate parameters.

use crate::core::error::{DomainError, validate_threshold};
use serde::{Deserialize, Serialize};

/// Bounds for the debate state machine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebateConfig {
    /// Hard cap on rounds, including the initial one
    pub max_rounds: usize,
    /// Fraction of all participants that must share a stance (or agree in
    /// the final vote) for consensus
    pub consensus_threshold: f64,
}

impl Default for DebateConfig {
    fn default() -> Self {
        Self {
            max_rounds: 3,
            consensus_threshold: 0.75,
        }
    }
}

impl DebateConfig {
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_consensus_threshold(mut self, threshold: f64) -> Self {
        self.consensus_threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_rounds == 0 {
            return Err(DomainError::InvalidMaxRounds);
        }
        validate_threshold("consensus_threshold", self.consensus_threshold)?;
        Ok(())
    }

    /// Whether `count` out of `total` participants clears the threshold
    pub fn is_met(&self, count: usize, total: usize) -> bool {
        total > 0 && count as f64 / total as f64 >= self.consensus_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DebateConfig::default();
        assert_eq!(config.max_rounds, 3);
        assert_eq!(config.consensus_threshold, 0.75);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert_eq!(
            DebateConfig::default().with_max_rounds(0).validate(),
            Err(DomainError::InvalidMaxRounds)
        );
        assert!(
            DebateConfig::default()
                .with_consensus_threshold(0.0)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_is_met_boundaries() {
        let config = DebateConfig::default();
        assert!(config.is_met(3, 4));
        assert!(!config.is_met(2, 4));
        assert!(!config.is_met(0, 0));
    }
}
