//! Typed failure of a single agent call.

use crate::ports::inference_gateway::GatewayError;
use panel_domain::DomainError;
use std::time::Duration;
use thiserror::Error;

/// An agent's judgment call failed.
///
/// Always caught by the caller and turned into an absence (debate round)
/// or a placeholder (orchestrated phase); it never aborts a session.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),
}

impl From<DomainError> for InferenceError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::MalformedJudgment(msg) => InferenceError::Malformed(msg),
            other => InferenceError::Malformed(other.to_string()),
        }
    }
}
