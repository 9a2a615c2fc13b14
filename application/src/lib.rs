//! Application layer for agent-panel
//!
//! This crate contains the agent adapter, the agent network, the debate and
//! deliberation use cases, port definitions and application configuration.
//! It depends only on the domain layer.

pub mod agents;
pub mod config;
pub mod network;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use agents::{AgentRoster, DeliberativeAgent, InferenceError, SpecialistAgent};
pub use config::OrchestratorConfig;
pub use network::{AgentNetwork, NetworkError};
pub use ports::{
    composite_sink::CompositeEventSink,
    event_sink::{EventSink, NoEvents, RecordingSink},
    inference_gateway::{GatewayError, InferenceGateway, RawJudgment},
};
pub use use_cases::run_debate::{RunDebateError, RunDebateInput, RunDebateUseCase};
pub use use_cases::run_deliberation::{DeliberationError, RunDeliberationUseCase};
