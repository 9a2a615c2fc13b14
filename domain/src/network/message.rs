//! Entries of the network's communication log.

use crate::agent::AgentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Routed copy of a high-impact insight
    Alert,
    /// Invitation to contribute to a collaborative decision
    DecisionRequest,
    /// Direct agent-to-agent note
    Note,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentMessage {
    pub id: Uuid,
    pub from: AgentId,
    pub to: AgentId,
    pub kind: MessageKind,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl AgentMessage {
    pub fn new(
        from: impl Into<AgentId>,
        to: impl Into<AgentId>,
        kind: MessageKind,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            from: from.into(),
            to: to.into(),
            kind,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Whether `agent` sent or received this message
    pub fn involves(&self, agent: &AgentId) -> bool {
        &self.from == agent || &self.to == agent
    }
}
