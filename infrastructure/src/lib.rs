//! Infrastructure layer for agent-panel
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: configuration file loading, the JSONL audit log, the
//! replay inference gateway and case file intake.

pub mod case;
pub mod config;
pub mod gateway;
pub mod logging;

// Re-export commonly used types
pub use case::{CaseLoadError, CaseLoader};
pub use config::{ConfigError, ConfigIssue, ConfigLoader, FileConfig, Severity};
pub use gateway::{ReplayInferenceGateway, ReplayLoadError};
pub use logging::JsonlEventLogger;
