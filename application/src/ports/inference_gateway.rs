//! Inference gateway port
//!
//! Defines the interface to whatever produces an agent's raw judgment
//! (an LLM provider, a replay file, a test double).

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during gateway operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("No response available for {0}")]
    Exhausted(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Raw output of one inference call
#[derive(Debug, Clone, PartialEq)]
pub struct RawJudgment {
    pub text: String,
    /// Provider-reported confidence, used when the text carries none
    pub confidence: f64,
}

impl RawJudgment {
    pub fn new(text: impl Into<String>, confidence: f64) -> Self {
        Self {
            text: text.into(),
            confidence,
        }
    }
}

/// Gateway for judgment calls
///
/// This port defines how agent adapters obtain judgments.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait InferenceGateway: Send + Sync {
    /// Run one inference with a system context, a user context and a
    /// sampling temperature
    async fn analyze(
        &self,
        system_context: &str,
        user_context: &str,
        temperature: f32,
    ) -> Result<RawJudgment, GatewayError>;
}
