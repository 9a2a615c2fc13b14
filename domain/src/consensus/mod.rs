//! Consensus building over a snapshot of positions.
//!
//! Positions are grouped by normalized stance into [`ConsensusOption`]s,
//! scored (`confidence = max supporter confidence × support ratio`) and the
//! best option is accepted when its support ratio clears the minimum
//! support. Every participant who does not support an option opposes it.

pub mod builder;
pub mod classifier;
pub mod option;

pub use builder::{COMPROMISE_CONFIDENCE, ConsensusBuilder, DEFAULT_MINIMUM_SUPPORT};
pub use classifier::{ArgumentClassifier, ArgumentKind, KeywordClassifier};
pub use option::{ConsensusOption, ConsensusResult};
