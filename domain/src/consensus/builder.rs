//! Consensus builder: option extraction, scoring, selection and
//! compromise synthesis over a single snapshot of positions.

use super::classifier::{ArgumentClassifier, ArgumentKind, KeywordClassifier};
use super::option::{ConsensusOption, ConsensusResult};
use crate::agent::AgentId;
use crate::core::error::{DomainError, validate_threshold};
use crate::deliberation::{Position, group_by_stance};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

/// Default share of participants an option needs to be accepted
pub const DEFAULT_MINIMUM_SUPPORT: f64 = 2.0 / 3.0;

/// Confidence assigned to a synthesized compromise
pub const COMPROMISE_CONFIDENCE: f64 = 0.6;

/// How many shared arguments a compromise keeps as benefits
const COMPROMISE_BENEFIT_LIMIT: usize = 5;

/// Stateless scorer over a flat list of positions.
///
/// # Example
///
/// ```
/// use panel_domain::consensus::ConsensusBuilder;
/// use panel_domain::deliberation::Position;
///
/// let positions = vec![
///     Position::new("a", "Refund", 0.9),
///     Position::new("b", "refund!", 0.6),
///     Position::new("c", "Escalate", 0.8),
/// ];
/// let result = ConsensusBuilder::new().build(&positions, &[]);
/// assert!(result.reached); // 2/3 meets the default minimum support
/// assert_eq!(result.selected.unwrap().description, "Refund");
/// ```
#[derive(Clone)]
pub struct ConsensusBuilder {
    minimum_support: f64,
    classifier: Arc<dyn ArgumentClassifier>,
}

impl Default for ConsensusBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConsensusBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsensusBuilder")
            .field("minimum_support", &self.minimum_support)
            .finish_non_exhaustive()
    }
}

impl ConsensusBuilder {
    pub fn new() -> Self {
        Self {
            minimum_support: DEFAULT_MINIMUM_SUPPORT,
            classifier: Arc::new(KeywordClassifier::default()),
        }
    }

    /// Set the acceptance bar, which must lie in `(0, 1]`.
    pub fn with_minimum_support(mut self, minimum_support: f64) -> Result<Self, DomainError> {
        self.minimum_support = validate_threshold("minimum_support", minimum_support)?;
        Ok(self)
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn ArgumentClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn minimum_support(&self) -> f64 {
        self.minimum_support
    }

    /// Group positions into scored options, in first-seen stance order.
    ///
    /// The participant set is `participants` plus any author found in
    /// `positions`, so absent participants oppose every option.
    pub fn extract_options(
        &self,
        positions: &[Position],
        participants: &[AgentId],
    ) -> Vec<ConsensusOption> {
        let everyone = participant_set(positions, participants);
        let total = everyone.len();

        group_by_stance(positions)
            .into_iter()
            .enumerate()
            .map(|(i, group)| {
                let mut supporting: Vec<AgentId> = Vec::new();
                for member in &group.members {
                    if !supporting.contains(&member.agent) {
                        supporting.push(member.agent.clone());
                    }
                }
                let opposing: Vec<AgentId> = everyone
                    .iter()
                    .filter(|a| !supporting.contains(a))
                    .cloned()
                    .collect();

                let mut benefits = Vec::new();
                let mut risks = Vec::new();
                let mut evidence = Vec::new();
                for member in &group.members {
                    for argument in &member.arguments {
                        match self.classifier.classify(argument) {
                            ArgumentKind::Benefit => benefits.push(argument.clone()),
                            ArgumentKind::Risk => risks.push(argument.clone()),
                            ArgumentKind::Neutral => {}
                        }
                    }
                    for item in &member.evidence {
                        if !evidence.contains(item) {
                            evidence.push(item.clone());
                        }
                    }
                }

                let max_confidence = group
                    .members
                    .iter()
                    .map(|p| p.confidence)
                    .fold(0.0_f64, f64::max);
                let ratio = if total == 0 {
                    0.0
                } else {
                    supporting.len() as f64 / total as f64
                };

                ConsensusOption {
                    id: format!("option-{}", i + 1),
                    description: group.stance.to_string(),
                    supporting_agents: supporting,
                    opposing_agents: opposing,
                    evidence,
                    risks,
                    benefits,
                    confidence: max_confidence * ratio,
                }
            })
            .collect()
    }

    /// Extract, score and select.
    ///
    /// Options are ranked by `(support_ratio desc, confidence desc)` with a
    /// stable sort; the top option is accepted only when its support ratio
    /// reaches the minimum support.
    pub fn build(&self, positions: &[Position], participants: &[AgentId]) -> ConsensusResult {
        let total_agents = participant_set(positions, participants).len();
        let mut options = self.extract_options(positions, participants);
        options.sort_by(|a, b| {
            b.support_ratio()
                .partial_cmp(&a.support_ratio())
                .unwrap_or(Ordering::Equal)
                .then_with(|| {
                    b.confidence
                        .partial_cmp(&a.confidence)
                        .unwrap_or(Ordering::Equal)
                })
        });

        let accepted = total_agents > 0
            && options
                .first()
                .is_some_and(|top| top.support_ratio() >= self.minimum_support);

        if accepted {
            let mut iter = options.into_iter();
            let selected = iter.next();
            ConsensusResult {
                reached: true,
                selected,
                alternatives: iter.collect(),
                total_agents,
                minimum_support: self.minimum_support,
            }
        } else {
            ConsensusResult {
                reached: false,
                selected: None,
                alternatives: options,
                total_agents,
                minimum_support: self.minimum_support,
            }
        }
    }

    /// Blend the panel's shared arguments into one option everybody accepts.
    ///
    /// Arguments repeated (case-insensitively) by at least two agents become
    /// benefits, most frequent first, capped at five; `constraints` become
    /// risks. Confidence is fixed at [`COMPROMISE_CONFIDENCE`].
    pub fn synthesize_compromise(
        &self,
        positions: &[Position],
        participants: &[AgentId],
        constraints: &[String],
    ) -> ConsensusOption {
        // (normalized argument, first-seen text, agents repeating it)
        let mut shared: Vec<(String, String, usize)> = Vec::new();
        let mut seen_per_agent: HashSet<(AgentId, String)> = HashSet::new();

        for position in positions {
            for argument in &position.arguments {
                let key = argument.trim().to_lowercase();
                if key.is_empty() || !seen_per_agent.insert((position.agent.clone(), key.clone())) {
                    continue;
                }
                match shared.iter_mut().find(|(k, _, _)| *k == key) {
                    Some(entry) => entry.2 += 1,
                    None => shared.push((key, argument.trim().to_string(), 1)),
                }
            }
        }

        shared.retain(|(_, _, count)| *count >= 2);
        shared.sort_by(|a, b| b.2.cmp(&a.2));
        let benefits: Vec<String> = shared
            .into_iter()
            .take(COMPROMISE_BENEFIT_LIMIT)
            .map(|(_, text, _)| text)
            .collect();

        let mut evidence = Vec::new();
        for item in positions.iter().flat_map(|p| &p.evidence) {
            if !evidence.contains(item) {
                evidence.push(item.clone());
            }
        }

        let description = if benefits.is_empty() {
            "Compromise: proceed on common ground".to_string()
        } else {
            format!("Compromise: {}", benefits.join("; "))
        };

        ConsensusOption {
            id: "compromise".to_string(),
            description,
            supporting_agents: participant_set(positions, participants),
            opposing_agents: Vec::new(),
            evidence,
            risks: constraints.to_vec(),
            benefits,
            confidence: COMPROMISE_CONFIDENCE,
        }
    }
}

/// `participants` followed by any position author not already listed.
fn participant_set(positions: &[Position], participants: &[AgentId]) -> Vec<AgentId> {
    let mut everyone: Vec<AgentId> = Vec::with_capacity(participants.len());
    for agent in participants.iter().chain(positions.iter().map(|p| &p.agent)) {
        if !everyone.contains(agent) {
            everyone.push(agent.clone());
        }
    }
    everyone
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<AgentId> {
        names.iter().map(|n| AgentId::new(*n)).collect()
    }

    #[test]
    fn test_supporting_and_opposing_partition_participants() {
        let positions = vec![
            Position::new("a", "refund", 0.9),
            Position::new("b", "escalate", 0.7),
            Position::new("c", "Refund.", 0.4),
        ];
        // "d" never answered
        let participants = ids(&["a", "b", "c", "d"]);
        let options = ConsensusBuilder::new().extract_options(&positions, &participants);

        assert_eq!(options.len(), 2);
        for option in &options {
            assert_eq!(
                option.supporting_agents.len() + option.opposing_agents.len(),
                participants.len()
            );
        }
        assert!(options[0].opposing_agents.contains(&AgentId::new("d")));
    }

    #[test]
    fn test_confidence_discounted_by_support_ratio() {
        let positions = vec![
            Position::new("a", "refund", 0.9),
            Position::new("b", "refund", 0.6),
            Position::new("c", "escalate", 0.8),
            Position::new("d", "escalate", 0.5),
        ];
        let options = ConsensusBuilder::new().extract_options(&positions, &[]);
        assert!((options[0].confidence - 0.45).abs() < 1e-9);
        assert!((options[1].confidence - 0.40).abs() < 1e-9);
    }

    #[test]
    fn test_benefits_and_risks_classified() {
        let positions = vec![
            Position::new("a", "refund", 0.9).with_arguments([
                "Improves loyalty",
                "Risk of abuse",
                "Customer is a long-time subscriber",
            ]),
            Position::new("b", "refund", 0.7).with_arguments(["Clear benefit for NPS"]),
        ];
        let options = ConsensusBuilder::new().extract_options(&positions, &[]);
        assert_eq!(options[0].benefits, vec!["Improves loyalty", "Clear benefit for NPS"]);
        assert_eq!(options[0].risks, vec!["Risk of abuse"]);
    }

    #[test]
    fn test_build_selects_majority() {
        let positions = vec![
            Position::new("a", "escalate", 0.9),
            Position::new("b", "refund", 0.6),
            Position::new("c", "refund", 0.7),
        ];
        let result = ConsensusBuilder::new().build(&positions, &[]);

        assert!(result.reached);
        let selected = result.selected.unwrap();
        assert_eq!(selected.description, "refund");
        assert_eq!(result.alternatives.len(), 1);
        assert_eq!(result.alternatives[0].description, "escalate");
    }

    #[test]
    fn test_build_ranks_by_confidence_on_equal_support() {
        let positions = vec![
            Position::new("a", "escalate", 0.5),
            Position::new("b", "refund", 0.9),
        ];
        let result = ConsensusBuilder::new().build(&positions, &[]);
        assert!(!result.reached);
        assert_eq!(result.alternatives[0].description, "refund");
    }

    #[test]
    fn test_all_distinct_stances_not_reached() {
        let positions: Vec<Position> = ["a", "b", "c", "d", "e"]
            .iter()
            .enumerate()
            .map(|(i, agent)| Position::new(*agent, format!("stance {i}"), 0.8))
            .collect();
        let result = ConsensusBuilder::new()
            .with_minimum_support(0.66)
            .unwrap()
            .build(&positions, &[]);

        assert!(!result.reached);
        assert!(result.selected.is_none());
        assert_eq!(result.alternatives.len(), 5);
    }

    #[test]
    fn test_single_agent_reaches_consensus() {
        let positions = vec![Position::new("solo", "approve", 0.7)];
        let result = ConsensusBuilder::new().build(&positions, &[]);
        assert!(result.reached);
    }

    #[test]
    fn test_empty_input_is_not_reached() {
        let result = ConsensusBuilder::new().build(&[], &[]);
        assert!(!result.reached);
        assert_eq!(result.total_agents, 0);
        assert!(result.alternatives.is_empty());
    }

    #[test]
    fn test_support_ratio_monotonic_in_supporters() {
        let participants = ids(&["a", "b", "c", "d", "e"]);
        let mut previous = 0.0;
        for supporters in 1..=participants.len() {
            let positions: Vec<Position> = participants[..supporters]
                .iter()
                .map(|a| Position::new(a.clone(), "approve", 0.8))
                .collect();
            let options = ConsensusBuilder::new().extract_options(&positions, &participants);
            let ratio = options[0].support_ratio();
            assert!(ratio > previous);
            previous = ratio;
        }
    }

    #[test]
    fn test_invalid_minimum_support() {
        assert!(ConsensusBuilder::new().with_minimum_support(0.0).is_err());
        assert!(ConsensusBuilder::new().with_minimum_support(1.2).is_err());
    }

    #[test]
    fn test_custom_classifier_is_used() {
        struct EverythingIsRisk;
        impl ArgumentClassifier for EverythingIsRisk {
            fn classify(&self, _argument: &str) -> ArgumentKind {
                ArgumentKind::Risk
            }
        }

        let positions = vec![Position::new("a", "x", 0.5).with_arguments(["Improves things"])];
        let options = ConsensusBuilder::new()
            .with_classifier(Arc::new(EverythingIsRisk))
            .extract_options(&positions, &[]);
        assert_eq!(options[0].risks, vec!["Improves things"]);
        assert!(options[0].benefits.is_empty());
    }

    #[test]
    fn test_compromise_keeps_shared_arguments() {
        let positions = vec![
            Position::new("a", "refund", 0.9).with_arguments([
                "Customer was double charged",
                "Outage lasted 3 hours",
                "Only a",
            ]),
            Position::new("b", "credit", 0.7).with_arguments([
                "customer was double charged",
                "Outage lasted 3 hours",
            ]),
            Position::new("c", "escalate", 0.4).with_arguments(["OUTAGE LASTED 3 HOURS"]),
        ];
        let constraints = vec!["Refunds above $500 need approval".to_string()];
        let compromise = ConsensusBuilder::new().synthesize_compromise(
            &positions,
            &ids(&["a", "b", "c", "d"]),
            &constraints,
        );

        assert_eq!(
            compromise.benefits,
            vec!["Outage lasted 3 hours", "Customer was double charged"]
        );
        assert_eq!(compromise.risks, constraints);
        assert_eq!(compromise.supporting_agents.len(), 4);
        assert!(compromise.opposing_agents.is_empty());
        assert_eq!(compromise.confidence, COMPROMISE_CONFIDENCE);
    }

    #[test]
    fn test_compromise_caps_benefits_at_five() {
        let shared: Vec<String> = (0..8).map(|i| format!("shared point {i}")).collect();
        let positions = vec![
            Position::new("a", "x", 0.5).with_arguments(shared.clone()),
            Position::new("b", "y", 0.5).with_arguments(shared.clone()),
        ];
        let compromise = ConsensusBuilder::new().synthesize_compromise(&positions, &[], &[]);
        assert_eq!(compromise.benefits.len(), 5);
        assert_eq!(compromise.benefits[0], "shared point 0");
    }

    #[test]
    fn test_compromise_ignores_self_repetition() {
        let positions = vec![
            Position::new("a", "x", 0.5).with_arguments(["same", "Same"]),
            Position::new("b", "y", 0.5).with_arguments(["other"]),
        ];
        let compromise = ConsensusBuilder::new().synthesize_compromise(&positions, &[], &[]);
        assert!(compromise.benefits.is_empty());
    }
}
