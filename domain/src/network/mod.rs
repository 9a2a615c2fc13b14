//! Records shared across sessions through the agent network.

pub mod decision;
pub mod insight;
pub mod memory;
pub mod message;

pub use decision::CollaborativeDecision;
pub use insight::{Impact, Insight, InsightKind};
pub use memory::{CaseOutcome, Memory, MemoryMetrics, SUCCESS_SATISFACTION};
pub use message::{AgentMessage, MessageKind};
