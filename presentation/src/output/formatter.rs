//! Output formatter trait

use panel_domain::{DebateOutcome, DeliberationResult};

/// Trait for formatting panel results
pub trait OutputFormatter {
    /// Format the complete deliberation result
    fn format(&self, result: &DeliberationResult) -> String;

    /// Format the recommendation only (concise output)
    fn format_summary(&self, result: &DeliberationResult) -> String;

    /// Format a standalone debate outcome
    fn format_debate(&self, outcome: &DebateOutcome) -> String;
}
