//! Shared agent network: insights, memories, statuses and the
//! communication log that outlive a single deliberation.

pub mod agent_network;
pub mod error;

pub use agent_network::{AgentNetwork, DEFAULT_LOG_CAPACITY};
pub use error::NetworkError;
