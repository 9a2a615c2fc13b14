//! Orchestration domain: phases, per-agent analyses, audit events and the
//! final deliberation result.
//!
//! ```text
//! Analysis (parallel) ─► [Debate] ─► Solution ─► FollowUp ─► Synthesis
//! ```

pub mod analysis;
pub mod event;
pub mod phase;
pub mod result;

pub use analysis::{AgentAnalysis, AnalysisRequest};
pub use event::{COORDINATOR_ACTOR, DeliberationEvent, EventKind};
pub use phase::Phase;
pub use result::{DeliberationMetrics, DeliberationResult};
