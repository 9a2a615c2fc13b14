//! Domain layer for agent-panel
//!
//! This crate contains the core entities, value objects and pure
//! algorithms of a deliberating agent panel. It has no dependencies on
//! infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Deliberation
//!
//! Specialist agents state [`Position`]s on a topic over bounded
//! [`Round`]s. A debate ends in a [`DebateOutcome`] either through early
//! agreement (the largest stance group clears the consensus threshold) or
//! through a final evaluation vote.
//!
//! ## Consensus
//!
//! The [`ConsensusBuilder`] scores a single snapshot of positions, picks
//! an option when it has enough support, and can synthesize a compromise.
//!
//! ## Network records
//!
//! [`Insight`]s, [`Memory`] records and [`AgentStatus`] entries outlive a
//! single session; the application layer's agent network owns them.

pub mod agent;
pub mod case;
pub mod consensus;
pub mod core;
pub mod deliberation;
pub mod network;
pub mod orchestration;
pub mod prompt;

// Re-export commonly used types
pub use agent::{AgentId, AgentRole, AgentStatus, PerformanceStats};
pub use case::Case;
pub use consensus::{
    ArgumentClassifier, ArgumentKind, ConsensusBuilder, ConsensusOption, ConsensusResult,
    KeywordClassifier,
};
pub use crate::core::{error::DomainError, string::normalize_stance};
pub use deliberation::{
    ConsensusVote, DebateConfig, DebateOutcome, DecisionPath, ParsedJudgment, Position, Round,
};
pub use network::{
    AgentMessage, CaseOutcome, CollaborativeDecision, Impact, Insight, InsightKind, Memory,
    MemoryMetrics, MessageKind,
};
pub use orchestration::{
    AgentAnalysis, AnalysisRequest, DeliberationEvent, DeliberationMetrics, DeliberationResult,
    EventKind, Phase,
};
pub use prompt::PromptTemplate;
