//! Console output formatter for panel results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use panel_domain::{AgentAnalysis, ConsensusResult, DebateOutcome, DeliberationResult, Phase};
use serde::Serialize;

/// Formats deliberation results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete deliberation result
    pub fn format(result: &DeliberationResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Agent Panel Deliberation"));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Case:".cyan().bold(), result.case_id));

        for phase in [Phase::Analysis, Phase::Solution, Phase::FollowUp] {
            let analyses: Vec<&AgentAnalysis> =
                result.analyses.iter().filter(|a| a.phase == phase).collect();
            if analyses.is_empty() {
                continue;
            }
            output.push_str(&Self::section_header(phase.display_name()));
            for analysis in analyses {
                output.push_str(&Self::analysis(analysis));
            }
        }

        if let Some(debate) = &result.debate {
            output.push_str(&Self::section_header(Phase::Debate.display_name()));
            output.push_str(&Self::debate_body(debate));
        }

        if let Some(consensus) = &result.consensus {
            output.push_str(&Self::section_header("Consensus"));
            output.push_str(&Self::consensus(consensus));
        }

        output.push_str(&Self::section_header(Phase::Synthesis.display_name()));
        output.push_str(&format!("\n{}\n", result.recommendation));

        let escalating: Vec<String> = result
            .successful_analyses()
            .filter(|a| a.should_escalate)
            .map(|a| a.agent.to_string())
            .collect();
        if !escalating.is_empty() {
            output.push_str(&format!(
                "\n{} {}\n",
                "Escalation requested by:".yellow().bold(),
                escalating.join(", ")
            ));
        }

        output.push_str(&Self::metrics(result));
        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the recommendation only (concise output)
    pub fn format_summary(result: &DeliberationResult) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            format!("=== Panel Recommendation: {} ===", result.case_id)
                .cyan()
                .bold()
        ));
        output.push_str(&result.recommendation);
        output.push('\n');
        output.push_str(&Self::metrics(result));

        output
    }

    /// Format a standalone debate outcome
    pub fn format_debate(outcome: &DebateOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Agent Panel Debate"));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Topic:".cyan().bold(), outcome.topic));
        output.push_str(&format!(
            "{} {}\n",
            "Participants:".cyan().bold(),
            outcome
                .participants
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ));

        for round in &outcome.rounds {
            output.push_str(&Self::section_header(&format!("Round {}", round.index)));
            for position in round.sorted_positions() {
                output.push_str(&format!(
                    "  {} {} ({:.2})\n",
                    format!("{}:", position.agent).yellow().bold(),
                    position.stance,
                    position.confidence
                ));
                for argument in &position.arguments {
                    output.push_str(&format!("      - {}\n", argument));
                }
            }
            for absent in &round.absent {
                output.push_str(&format!("  {} {}\n", format!("{absent}:").red(), "absent".dimmed()));
            }
        }

        output.push_str(&Self::section_header("Outcome"));
        output.push_str(&Self::debate_body(outcome));
        output.push_str(&Self::footer());

        output
    }

    /// Short form of a debate outcome (stance, path, dissent)
    pub fn format_debate_summary(outcome: &DebateOutcome) -> String {
        let mut output = format!("{} {}\n\n", "Topic:".bold(), outcome.topic);
        output.push_str(&Self::debate_body(outcome));
        output
    }

    fn analysis(analysis: &AgentAnalysis) -> String {
        if !analysis.succeeded {
            return format!(
                "\n{}\nError: {}\n",
                format!("── {} ──", analysis.agent).red().bold(),
                analysis.error.as_deref().unwrap_or("Unknown")
            );
        }

        let mut out = format!(
            "\n{} {}\n{}\n",
            format!("── {} ──", analysis.agent).yellow().bold(),
            format!("(confidence {:.2})", analysis.confidence).dimmed(),
            analysis.summary
        );
        for finding in &analysis.findings {
            out.push_str(&format!("  * {}\n", finding));
        }
        if !analysis.evidence.is_empty() {
            out.push_str(&format!("  {}\n", "Evidence:".dimmed()));
            for item in &analysis.evidence {
                out.push_str(&format!("    - {}\n", item));
            }
        }
        if analysis.should_escalate {
            out.push_str(&format!("  {}\n", "! requests escalation".yellow()));
        }
        out
    }

    fn debate_body(outcome: &DebateOutcome) -> String {
        let mut out = String::new();
        match &outcome.consensus_stance {
            Some(stance) => out.push_str(&format!(
                "{} {}\n",
                "Consensus:".green().bold(),
                stance
            )),
            None => out.push_str(&format!("{}\n", "No consensus".yellow().bold())),
        }
        out.push_str(&format!(
            "{} {}   {} {:.2}   {} {}\n",
            "Path:".dimmed(),
            outcome.decision_path,
            "Confidence:".dimmed(),
            outcome.confidence,
            "Rounds:".dimmed(),
            outcome.rounds_run()
        ));
        if !outcome.dissent.is_empty() {
            out.push_str(&format!("\n{}\n", "Dissent:".yellow().bold()));
            for item in &outcome.dissent {
                out.push_str(&format!("  * {}\n", item));
            }
        }
        out
    }

    fn consensus(consensus: &ConsensusResult) -> String {
        let mut out = String::new();
        if !consensus.reached {
            out.push_str(&format!(
                "{} (minimum support {:.0}%)\n",
                "Not reached".yellow(),
                consensus.minimum_support * 100.0
            ));
        }
        for (rank, option) in consensus.ranked().enumerate() {
            let line = format!(
                "{}. {} - support {:.0}%, confidence {:.2}",
                rank + 1,
                option.description,
                option.support_ratio() * 100.0,
                option.confidence
            );
            if rank == 0 && consensus.reached {
                out.push_str(&format!("  {}\n", line.green()));
            } else {
                out.push_str(&format!("  {}\n", line));
            }
            for risk in &option.risks {
                out.push_str(&format!("       risk: {}\n", risk));
            }
        }
        out
    }

    fn metrics(result: &DeliberationResult) -> String {
        let metrics = &result.metrics;
        let escalate = if metrics.should_escalate {
            "yes".red().bold()
        } else {
            "no".green()
        };
        let mut out = format!(
            "\n{} {:.2}   {} {}   {} {}/{}\n",
            "Confidence:".cyan().bold(),
            metrics.overall_confidence,
            "Escalate:".cyan().bold(),
            escalate,
            "Agents:".cyan().bold(),
            metrics.agents_succeeded,
            metrics.agents_succeeded + metrics.agents_failed
        );
        if !metrics.phase_durations_ms.is_empty() {
            let timings: Vec<String> = metrics
                .phase_durations_ms
                .iter()
                .map(|(phase, ms)| format!("{phase} {ms}ms"))
                .collect();
            out.push_str(&format!("{}\n", timings.join(", ").dimmed()));
        }
        out
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, result: &DeliberationResult) -> String {
        Self::format(result)
    }

    fn format_summary(&self, result: &DeliberationResult) -> String {
        Self::format_summary(result)
    }

    fn format_debate(&self, outcome: &DebateOutcome) -> String {
        Self::format_debate(outcome)
    }
}
