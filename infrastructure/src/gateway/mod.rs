//! Inference gateway adapters.

mod replay;

pub use replay::{
    DEFAULT_REPLAY_CONFIDENCE, ReplayInferenceGateway, ReplayLoadError, ScriptedResponse,
};
