//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("No participants configured for deliberation")]
    NoParticipants,

    #[error("No participant responded during {0}")]
    NoQuorum(String),

    #[error("Invalid threshold {name}: {value} (must be within (0, 1])")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("max_rounds must be at least 1")]
    InvalidMaxRounds,

    #[error("Unknown agent role: {0}")]
    UnknownRole(String),

    #[error("Malformed judgment: {0}")]
    MalformedJudgment(String),

    #[error("Invalid case: {0}")]
    InvalidCase(String),
}

impl DomainError {
    /// Check if this error means nobody answered
    pub fn is_no_quorum(&self) -> bool {
        matches!(self, DomainError::NoQuorum(_))
    }
}

/// Validate a ratio-style threshold in `(0, 1]`.
pub fn validate_threshold(name: &'static str, value: f64) -> Result<f64, DomainError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err(DomainError::InvalidThreshold { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_quorum_display() {
        let error = DomainError::NoQuorum("round 2".to_string());
        assert_eq!(error.to_string(), "No participant responded during round 2");
        assert!(error.is_no_quorum());
        assert!(!DomainError::NoParticipants.is_no_quorum());
    }

    #[test]
    fn test_validate_threshold() {
        assert_eq!(validate_threshold("t", 0.75), Ok(0.75));
        assert_eq!(validate_threshold("t", 1.0), Ok(1.0));
        assert!(validate_threshold("t", 0.0).is_err());
        assert!(validate_threshold("t", 1.5).is_err());
        assert!(validate_threshold("t", f64::NAN).is_err());
    }
}
