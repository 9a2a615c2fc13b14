//! Prompt templates for panel agents

use crate::agent::AgentRole;
use crate::deliberation::Position;
use crate::orchestration::AnalysisRequest;

/// Marker line every system prompt starts with; gateways may route on it
pub const ROLE_MARKER: &str = "ROLE:";

const RESPONSE_FORMAT: &str = r#"Answer in exactly this format:
STANCE: <your recommended course of action, one line>
CONFIDENCE: <number between 0 and 1>
ARGUMENTS:
- <supporting argument>
EVIDENCE:
- <fact from the case supporting your stance>"#;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for a specialist role
    pub fn system(role: AgentRole) -> String {
        let focus = match role {
            AgentRole::CustomerInsightAgent => {
                "You read the customer's history, sentiment and intent. Judge what outcome would \
                 keep the customer and what they are really asking for."
            }
            AgentRole::PatternAnalyst => {
                "You look for recurring issues, anomalies and root causes across cases. Judge \
                 whether this case is part of a larger pattern."
            }
            AgentRole::ComplianceGuardian => {
                "You check policy, regulatory and contractual constraints. Flag anything that \
                 would make a resolution non-compliant."
            }
            AgentRole::SolutionArchitect => {
                "You turn the specialists' analyses into one concrete, actionable resolution."
            }
            AgentRole::ProactiveAgent => {
                "You plan follow-up and prevention once a resolution is chosen, so the issue \
                 does not come back."
            }
        };
        format!(
            "{ROLE_MARKER} {}\nYou are the {} on a panel of support specialists.\n{focus}\n\
             Be concise and stick to facts from the case.",
            role.as_str(),
            role.display_name()
        )
    }

    /// Initial, independent position on a topic
    pub fn state_position(topic: &str) -> String {
        format!("Topic under deliberation:\n{topic}\n\nState your position.\n\n{RESPONSE_FORMAT}")
    }

    /// Revised position after seeing the previous round
    pub fn respond_to_positions(topic: &str, prior: &[Position], round: usize) -> String {
        let mut prompt = format!(
            "Topic under deliberation:\n{topic}\n\nThis is round {round}. The panel's positions \
             from the previous round were:\n"
        );
        prompt.push_str(&Self::render_positions(prior));
        prompt.push_str(
            "\nReconsider your position in light of the others. Keep it if you still believe \
             it, or move towards a position you now find better supported.\n\n",
        );
        prompt.push_str(RESPONSE_FORMAT);
        prompt
    }

    /// Ask whether the final positions amount to consensus
    pub fn evaluate_consensus(topic: &str, positions: &[Position]) -> String {
        let mut prompt = format!("Topic under deliberation:\n{topic}\n\nFinal positions:\n");
        prompt.push_str(&Self::render_positions(positions));
        prompt.push_str(
            "\nCan you accept the most widely held position as the panel's decision?\n\
             Answer in exactly this format:\nAGREE: yes|no\nREASON: <one line>",
        );
        prompt
    }

    /// Case analysis for an orchestrated phase
    pub fn analyze(request: &AnalysisRequest) -> String {
        let case = &request.case;
        let mut prompt = format!(
            "Case {} ({}): {}\n\n{}\n",
            case.id, case.subject, case.title, case.description
        );

        if !case.prior_messages.is_empty() {
            prompt.push_str("\nConversation so far:\n");
            for message in &case.prior_messages {
                prompt.push_str(&format!("> {message}\n"));
            }
        }

        if !request.memories.is_empty() {
            prompt.push_str("\nEarlier cases for this customer:\n");
            for memory in &request.memories {
                prompt.push_str(&format!("- {memory}\n"));
            }
        }

        if !request.notes.is_empty() {
            prompt.push_str("\nPanel notes:\n");
            for note in &request.notes {
                prompt.push_str(&format!("- {note}\n"));
            }
        }

        let prior: Vec<_> = request.prior_analyses.iter().filter(|a| a.succeeded).collect();
        if !prior.is_empty() {
            prompt.push_str("\nAnalyses from other specialists:\n");
            for analysis in prior {
                prompt.push_str(&format!(
                    "--- {} (confidence {:.2}) ---\n{}\n",
                    analysis.agent, analysis.confidence, analysis.summary
                ));
                for finding in &analysis.findings {
                    prompt.push_str(&format!("- {finding}\n"));
                }
            }
        }

        prompt.push_str(&format!("\nPhase: {}\n\n{RESPONSE_FORMAT}\n", request.phase));
        prompt.push_str(
            "ESCALATE: yes|no (yes if a human must take over)\nNEXT ACTIONS:\n- <next step>",
        );
        prompt
    }

    fn render_positions(positions: &[Position]) -> String {
        let mut out = String::new();
        for position in positions {
            out.push_str(&format!(
                "--- {} (confidence {:.2}) ---\nSTANCE: {}\n",
                position.agent, position.confidence, position.stance
            ));
            for argument in &position.arguments {
                out.push_str(&format!("- {argument}\n"));
            }
        }
        out
    }
}

/// Extract the role name from a system prompt built by [`PromptTemplate::system`]
pub fn role_from_system_prompt(system: &str) -> Option<&str> {
    system
        .lines()
        .next()?
        .strip_prefix(ROLE_MARKER)
        .map(str::trim)
        .filter(|r| !r.is_empty())
}
