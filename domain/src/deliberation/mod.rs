//! Deliberation domain: positions, rounds and debate outcomes.
//!
//! ```text
//! Gathering ──► Round(1) ──► EarlyConsensusCheck ──► Round(k+1) ──► ...
//!                                   │                                │
//!                                   ▼                                ▼ (max_rounds)
//!                               Finalized ◄──────────────────── FinalConsensus
//! ```
//!
//! The state machine itself lives in the application layer
//! (`RunDebateUseCase`); this module holds the data it produces and the
//! pure helpers it relies on.

pub mod config;
pub mod outcome;
pub mod parsing;
pub mod position;
pub mod round;
pub mod stance;

pub use config::DebateConfig;
pub use outcome::{DebateOutcome, DecisionPath};
pub use parsing::{ParsedJudgment, parse_confidence, parse_evaluation, parse_judgment};
pub use position::{ConsensusVote, Position, clamp_confidence};
pub use round::Round;
pub use stance::{StanceGroup, group_by_stance, largest_group};
