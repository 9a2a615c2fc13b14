//! Agent identity and status.

pub mod role;
pub mod status;

pub use role::{AgentId, AgentRole};
pub use status::{AgentStatus, PerformanceStats};
