use panel_domain::AgentId;
use thiserror::Error;

/// Rejected status transitions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    #[error("Agent {agent} is busy with {task}")]
    AgentBusy { agent: AgentId, task: String },

    #[error("Agent {0} is not registered")]
    UnknownAgent(AgentId),
}
