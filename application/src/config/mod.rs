//! Application-level configuration.
//!
//! - [`OrchestratorConfig`]: phase line-up, escalation and debate parameters

pub mod orchestrator_config;

pub use orchestrator_config::{
    DEFAULT_ESCALATION_THRESHOLD, OrchestratorConfig, RECOMMENDATION_CONFIDENCE,
};
