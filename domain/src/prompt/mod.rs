//! Prompt domain
//!
//! Templates for every agent call: initial positions, debate responses,
//! consensus evaluation and phase analyses.

mod template;

pub use template::{PromptTemplate, ROLE_MARKER, role_from_system_prompt};
