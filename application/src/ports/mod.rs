//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod composite_sink;
pub mod event_sink;
pub mod inference_gateway;
