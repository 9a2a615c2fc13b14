//! Which agent sits in which role seat.

use super::adapter::DeliberativeAgent;
use super::specialist::SpecialistAgent;
use crate::ports::inference_gateway::InferenceGateway;
use panel_domain::AgentRole;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Role → agent mapping used by the orchestrator.
#[derive(Clone, Default)]
pub struct AgentRoster {
    seats: HashMap<AgentRole, Arc<dyn DeliberativeAgent>>,
}

impl AgentRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seat a [`SpecialistAgent`] for every role, all sharing `gateway`
    pub fn specialists<G: InferenceGateway + 'static>(
        gateway: Arc<G>,
        temperature: f32,
        timeout: Option<Duration>,
    ) -> Self {
        AgentRole::ALL.iter().fold(Self::new(), |roster, role| {
            let agent = SpecialistAgent::new(*role, Arc::clone(&gateway))
                .with_temperature(temperature)
                .with_timeout(timeout);
            roster.with_agent(*role, Arc::new(agent))
        })
    }

    pub fn with_agent(mut self, role: AgentRole, agent: Arc<dyn DeliberativeAgent>) -> Self {
        self.seats.insert(role, agent);
        self
    }

    pub fn get(&self, role: AgentRole) -> Option<&Arc<dyn DeliberativeAgent>> {
        self.seats.get(&role)
    }

    /// Agents for `roles`, in that order; roles without a seat are skipped
    pub fn agents_for(&self, roles: &[AgentRole]) -> Vec<Arc<dyn DeliberativeAgent>> {
        roles.iter().filter_map(|r| self.get(*r).cloned()).collect()
    }

    pub fn missing(&self, roles: &[AgentRole]) -> Option<AgentRole> {
        roles.iter().copied().find(|r| !self.seats.contains_key(r))
    }
}
