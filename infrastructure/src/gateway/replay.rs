//! Scripted inference gateway.
//!
//! Serves judgments from a JSON file instead of a live model:
//!
//! ```json
//! {
//!   "PatternAnalyst": [
//!     "STANCE: refund\nCONFIDENCE: 0.8",
//!     {"text": "STANCE: refund", "confidence": 0.6},
//!     {"error": "provider unavailable"}
//!   ]
//! }
//! ```
//!
//! Each role's queue is served in order; once only one entry is left it is
//! repeated for every further call.

use async_trait::async_trait;
use panel_application::{GatewayError, InferenceGateway, RawJudgment};
use panel_domain::prompt::role_from_system_prompt;
use parking_lot::Mutex;
use serde::Deserialize;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Confidence used when a scripted entry gives none
pub const DEFAULT_REPLAY_CONFIDENCE: f64 = 0.5;

#[derive(Error, Debug)]
pub enum ReplayLoadError {
    #[error("Failed to read script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid script {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One scripted response
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScriptedResponse {
    Text(String),
    Judgment {
        text: String,
        #[serde(default)]
        confidence: Option<f64>,
    },
    Failure {
        error: String,
    },
}

impl ScriptedResponse {
    fn to_result(&self) -> Result<RawJudgment, GatewayError> {
        match self {
            ScriptedResponse::Text(text) => {
                Ok(RawJudgment::new(text.clone(), DEFAULT_REPLAY_CONFIDENCE))
            }
            ScriptedResponse::Judgment { text, confidence } => Ok(RawJudgment::new(
                text.clone(),
                confidence.unwrap_or(DEFAULT_REPLAY_CONFIDENCE),
            )),
            ScriptedResponse::Failure { error } => Err(GatewayError::RequestFailed(error.clone())),
        }
    }
}

/// Inference gateway that replays a per-role script.
pub struct ReplayInferenceGateway {
    queues: Mutex<HashMap<String, VecDeque<ScriptedResponse>>>,
}

impl ReplayInferenceGateway {
    pub fn new(script: HashMap<String, Vec<ScriptedResponse>>) -> Self {
        let queues = script
            .into_iter()
            .map(|(role, responses)| (role, VecDeque::from(responses)))
            .collect();
        Self {
            queues: Mutex::new(queues),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ReplayLoadError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ReplayLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| ReplayLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Roles that have a script
    pub fn roles(&self) -> Vec<String> {
        let mut roles: Vec<String> = self.queues.lock().keys().cloned().collect();
        roles.sort();
        roles
    }

    fn next_for(&self, role: &str) -> Option<ScriptedResponse> {
        let mut queues = self.queues.lock();
        let queue = queues.get_mut(role)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl InferenceGateway for ReplayInferenceGateway {
    async fn analyze(
        &self,
        system_context: &str,
        _user_context: &str,
        _temperature: f32,
    ) -> Result<RawJudgment, GatewayError> {
        let role = role_from_system_prompt(system_context).ok_or_else(|| {
            GatewayError::Other("system prompt carries no role marker".to_string())
        })?;
        debug!("Replaying next response for {}", role);

        self.next_for(role)
            .ok_or_else(|| GatewayError::Exhausted(role.to_string()))?
            .to_result()
    }
}
