//! Progress reporting for panel execution

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use panel_application::EventSink;
use panel_domain::{DeliberationEvent, EventKind};
use parking_lot::Mutex;
use serde_json::Value;

/// Reports progress during a deliberation with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map(|style| style.progress_chars("=>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }

    fn start_bar(&self, prefix: String, len: usize) {
        let pb = self.multi.add(ProgressBar::new(len as u64));
        pb.set_style(Self::phase_style());
        pb.set_prefix(prefix);
        pb.set_message("Starting...");

        if let Some(previous) = self.phase_bar.lock().replace(pb) {
            previous.finish_and_clear();
        }
    }

    fn tick(&self, message: String) {
        if let Some(pb) = self.phase_bar.lock().as_ref() {
            pb.set_message(message);
            pb.inc(1);
        }
    }

    fn finish(&self, message: String) {
        if let Some(pb) = self.phase_bar.lock().take() {
            pb.finish_with_message(message);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for ProgressReporter {
    fn emit(&self, event: &DeliberationEvent) {
        match event.kind {
            EventKind::PhaseStarted => {
                let phase = event.phase().unwrap_or("phase");
                self.start_bar(phase_label(phase), count(&event.payload, "agents"));
            }
            EventKind::AgentCompleted => {
                self.tick(format!("{} {}", "v".green(), event.actor));
            }
            EventKind::AgentFailed | EventKind::AgentSkipped => {
                self.tick(format!("{} {}", "x".red(), event.actor));
            }
            EventKind::PhaseCompleted => {
                let phase = event.phase().unwrap_or("phase");
                self.finish(format!("{} complete!", phase_label(phase).green()));
            }
            EventKind::RoundStarted => {
                let round = number(&event.payload, "round");
                let invited = number(&event.payload, "invited");
                self.start_bar(format!("Round {round}"), invited as usize);
            }
            EventKind::RoundCompleted => {
                if let Some(pb) = self.phase_bar.lock().as_ref() {
                    pb.set_position(number(&event.payload, "responded"));
                }
                let absent = count(&event.payload, "absent");
                let message = if absent == 0 {
                    "all responded".green().to_string()
                } else {
                    format!("{absent} absent").yellow().to_string()
                };
                self.finish(message);
            }
            EventKind::EarlyConsensus => {
                let _ = self.multi.println(format!("{} early consensus", "*".green()));
            }
            _ => {}
        }
    }
}

/// Simple text-based progress (no progress bars)
pub struct SimpleProgress;

impl EventSink for SimpleProgress {
    fn emit(&self, event: &DeliberationEvent) {
        match event.kind {
            EventKind::PhaseStarted => {
                let phase = event.phase().unwrap_or("phase");
                eprintln!(
                    "{} {} ({} agents)",
                    "->".cyan(),
                    phase_label(phase).bold(),
                    count(&event.payload, "agents")
                );
            }
            EventKind::AgentCompleted => eprintln!("  {} {}", "v".green(), event.actor),
            EventKind::AgentFailed => eprintln!("  {} {} (failed)", "x".red(), event.actor),
            EventKind::AgentSkipped => eprintln!("  {} {} (busy)", "-".yellow(), event.actor),
            EventKind::RoundCompleted => eprintln!(
                "  {} round {}: {} responded",
                "~".cyan(),
                number(&event.payload, "round"),
                number(&event.payload, "responded")
            ),
            EventKind::PhaseCompleted => eprintln!(),
            _ => {}
        }
    }
}

fn phase_label(phase: &str) -> String {
    match phase {
        "analysis" => "Phase 1: Independent Analysis".to_string(),
        "debate" => "Phase 1b: Debate".to_string(),
        "solution" => "Phase 2: Solution Design".to_string(),
        "follow_up" => "Phase 3: Proactive Follow-up".to_string(),
        "synthesis" => "Phase 4: Synthesis".to_string(),
        other => other.to_string(),
    }
}

fn count(payload: &Value, key: &str) -> usize {
    payload.get(key).and_then(Value::as_array).map_or(0, Vec::len)
}

fn number(payload: &Value, key: &str) -> u64 {
    payload.get(key).and_then(Value::as_u64).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_domain::{Phase, Round};
    use serde_json::json;

    #[test]
    fn test_payload_helpers() {
        let event = DeliberationEvent::phase_started(
            Phase::Analysis,
            &["PatternAnalyst".to_string(), "ResolutionArchitect".to_string()],
        );
        assert_eq!(count(&event.payload, "agents"), 2);
        assert_eq!(count(&event.payload, "missing"), 0);

        let event = DeliberationEvent::round_completed(&Round::new(3, vec![], vec![]));
        assert_eq!(number(&event.payload, "round"), 3);
        assert_eq!(number(&json!({}), "round"), 0);
    }

    #[test]
    fn test_phase_label() {
        assert_eq!(phase_label("follow_up"), "Phase 3: Proactive Follow-up");
        assert_eq!(phase_label("custom"), "custom");
    }

    #[test]
    fn test_reporter_survives_out_of_order_events() {
        let reporter = ProgressReporter::new();
        reporter.emit(&DeliberationEvent::phase_completed(Phase::Solution, 0.5, 1, 0));
        reporter.emit(&DeliberationEvent::round_started(1, 2));
        reporter.emit(&DeliberationEvent::round_completed(&Round::new(1, vec![], vec![])));
        assert!(reporter.phase_bar.lock().is_none());
    }
}
