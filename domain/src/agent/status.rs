//! Agent liveness/status records held by the agent network.

use super::role::AgentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Running performance counters for an agent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceStats {
    pub tasks_completed: u64,
    pub tasks_failed: u64,
    /// Mean confidence over completed tasks that reported one
    pub average_confidence: f64,
    #[serde(skip)]
    confidence_samples: u64,
}

impl PerformanceStats {
    /// Record the end of a task.
    pub fn record(&mut self, success: bool, confidence: Option<f64>) {
        if success {
            self.tasks_completed += 1;
        } else {
            self.tasks_failed += 1;
        }
        if let Some(c) = confidence {
            let n = self.confidence_samples as f64;
            self.average_confidence = (self.average_confidence * n + c) / (n + 1.0);
            self.confidence_samples += 1;
        }
    }

    /// Share of finished tasks that succeeded, `None` before the first task.
    pub fn success_rate(&self) -> Option<f64> {
        let total = self.tasks_completed + self.tasks_failed;
        (total > 0).then(|| self.tasks_completed as f64 / total as f64)
    }
}

/// Status of one agent in the network.
///
/// Transitions are `idle -> busy -> idle`; at most one task is recorded at
/// a time and `last_active_at` moves on every transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentStatus {
    pub agent_id: AgentId,
    pub busy: bool,
    pub current_task: Option<String>,
    pub last_active_at: DateTime<Utc>,
    pub expertise_tags: Vec<String>,
    pub performance: PerformanceStats,
}

impl AgentStatus {
    pub fn idle(agent_id: AgentId, expertise_tags: Vec<String>) -> Self {
        Self {
            agent_id,
            busy: false,
            current_task: None,
            last_active_at: Utc::now(),
            expertise_tags,
            performance: PerformanceStats::default(),
        }
    }

    pub fn is_available(&self) -> bool {
        !self.busy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_performance_stats_running_mean() {
        let mut stats = PerformanceStats::default();
        assert_eq!(stats.success_rate(), None);

        stats.record(true, Some(0.8));
        stats.record(true, Some(0.6));
        stats.record(false, None);

        assert_eq!(stats.tasks_completed, 2);
        assert_eq!(stats.tasks_failed, 1);
        assert!((stats.average_confidence - 0.7).abs() < 1e-9);
        assert!((stats.success_rate().unwrap() - 2.0 / 3.0).abs() < 1e-9);
    }
}
