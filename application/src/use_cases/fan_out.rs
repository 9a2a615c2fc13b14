//! Concurrent wait-all calls over a set of agents.

use crate::agents::{DeliberativeAgent, InferenceError};
use panel_domain::AgentId;
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::warn;

/// Outcome of one fan-out: results in completion order plus the agents
/// that produced nothing at all (panicked tasks).
pub(crate) struct FanOut<T> {
    pub results: Vec<(AgentId, Result<T, InferenceError>)>,
    pub lost: Vec<AgentId>,
}

impl<T> FanOut<T> {
    /// Successful values in completion order; failures are logged
    pub fn into_successes(self, label: &str) -> (Vec<T>, Vec<AgentId>) {
        let mut values = Vec::new();
        let mut failed = self.lost;
        for (agent, result) in self.results {
            match result {
                Ok(value) => values.push(value),
                Err(e) => {
                    warn!("{} failed during {}: {}", agent, label, e);
                    failed.push(agent);
                }
            }
        }
        (values, failed)
    }
}

/// Run `call` on every agent concurrently and wait for all of them.
pub(crate) async fn fan_out<T, F, Fut>(agents: &[Arc<dyn DeliberativeAgent>], call: F) -> FanOut<T>
where
    T: Send + 'static,
    F: Fn(Arc<dyn DeliberativeAgent>) -> Fut,
    Fut: Future<Output = Result<T, InferenceError>> + Send + 'static,
{
    let mut join_set = JoinSet::new();

    for agent in agents {
        let id = agent.id().clone();
        let future = call(Arc::clone(agent));
        join_set.spawn(async move { (id, future.await) });
    }

    let mut results = Vec::with_capacity(agents.len());
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok(entry) => results.push(entry),
            Err(e) => warn!("Task join error: {}", e),
        }
    }

    let lost = agents
        .iter()
        .map(|a| a.id())
        .filter(|id| !results.iter().any(|(seen, _)| seen == *id))
        .cloned()
        .collect();

    FanOut { results, lost }
}
