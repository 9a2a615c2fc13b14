//! Agent adapters.
//!
//! [`DeliberativeAgent`] is the capability the coordinator and orchestrator
//! program against; [`SpecialistAgent`] implements it for every
//! [`AgentRole`](panel_domain::AgentRole) on top of an inference gateway,
//! and [`AgentRoster`] seats one agent per role.

pub mod adapter;
pub mod error;
pub mod roster;
pub mod specialist;

pub use adapter::DeliberativeAgent;
pub use error::InferenceError;
pub use roster::AgentRoster;
pub use specialist::{DEFAULT_TEMPERATURE, SpecialistAgent};
