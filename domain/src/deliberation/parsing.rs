//! Judgment parsing.
//!
//! Agents answer in a line-oriented format. These functions pull the
//! structured pieces (stance, arguments, evidence, confidence, votes) out of
//! the raw text. They are pure domain logic: no I/O, no sessions.
//!
//! | Field | Keyword | Required |
//! |-------|---------|----------|
//! | stance | `STANCE:` | yes ([`parse_judgment`]) |
//! | confidence | `CONFIDENCE:` | no, falls back to the gateway score |
//! | arguments | `ARGUMENT:` or `- ` bullets under `ARGUMENTS:` | no |
//! | evidence | `EVIDENCE:` or bullets under `EVIDENCE:` | no |
//! | vote | `AGREE: yes/no` + `REASON:` | yes ([`parse_evaluation`]) |
//! | escalation | `ESCALATE: yes/no` | no |
//! | next actions | `NEXT:` or bullets under `NEXT ACTIONS:` | no |

use super::position::clamp_confidence;
use crate::core::error::DomainError;

/// Structured content of an agent's free-form answer
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedJudgment {
    pub stance: String,
    pub arguments: Vec<String>,
    pub evidence: Vec<String>,
    pub confidence: f64,
    pub escalate: Option<bool>,
    pub next_actions: Vec<String>,
}

#[derive(Clone, Copy, PartialEq)]
enum Section {
    None,
    Arguments,
    Evidence,
    NextActions,
}

/// Parse a judgment, using `fallback_confidence` when the text carries none.
///
/// # Errors
///
/// [`DomainError::MalformedJudgment`] when no non-empty `STANCE:` line exists.
pub fn parse_judgment(text: &str, fallback_confidence: f64) -> Result<ParsedJudgment, DomainError> {
    let mut judgment = ParsedJudgment {
        confidence: clamp_confidence(fallback_confidence),
        ..Default::default()
    };
    let mut stance = None;
    let mut section = Section::None;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some((key, value)) = split_field(line) {
            section = Section::None;
            match key.as_str() {
                "STANCE" | "POSITION" if !value.is_empty() => stance = Some(value.to_string()),
                "CONFIDENCE" => {
                    if let Some(c) = parse_confidence(value) {
                        judgment.confidence = c;
                    }
                }
                "ARGUMENT" => push_non_empty(&mut judgment.arguments, value),
                "ARGUMENTS" => {
                    section = Section::Arguments;
                    push_non_empty(&mut judgment.arguments, value);
                }
                "EVIDENCE" => {
                    section = Section::Evidence;
                    push_non_empty(&mut judgment.evidence, value);
                }
                "ESCALATE" => judgment.escalate = parse_yes_no(value),
                "NEXT" | "NEXT ACTION" => push_non_empty(&mut judgment.next_actions, value),
                "NEXT ACTIONS" => {
                    section = Section::NextActions;
                    push_non_empty(&mut judgment.next_actions, value);
                }
                _ => {}
            }
            continue;
        }

        if let Some(item) = bullet(line) {
            match section {
                Section::Arguments => push_non_empty(&mut judgment.arguments, item),
                Section::Evidence => push_non_empty(&mut judgment.evidence, item),
                Section::NextActions => push_non_empty(&mut judgment.next_actions, item),
                Section::None => {}
            }
        }
    }

    judgment.stance = stance.ok_or_else(|| {
        DomainError::MalformedJudgment("response has no STANCE line".to_string())
    })?;
    Ok(judgment)
}

/// Parse a consensus evaluation into `(agrees, reason)`.
///
/// # Errors
///
/// [`DomainError::MalformedJudgment`] when no `AGREE:` line with a
/// recognizable yes/no exists.
pub fn parse_evaluation(text: &str) -> Result<(bool, String), DomainError> {
    let mut agrees = None;
    let mut reason = None;

    for line in text.lines().map(str::trim) {
        if let Some((key, value)) = split_field(line) {
            match key.as_str() {
                "AGREE" | "AGREES" => agrees = parse_yes_no(value),
                "REASON" if !value.is_empty() => reason = Some(value.to_string()),
                _ => {}
            }
        }
    }

    let agrees = agrees.ok_or_else(|| {
        DomainError::MalformedJudgment("evaluation has no AGREE: yes/no line".to_string())
    })?;
    let reason = reason.unwrap_or_else(|| {
        if agrees { "agrees" } else { "disagrees" }.to_string()
    });
    Ok((agrees, reason))
}

/// Parse a confidence as a fraction (`0.8`) or percentage (`80%`, `80`).
pub fn parse_confidence(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let (number, percent) = match trimmed.strip_suffix('%') {
        Some(n) => (n.trim(), true),
        None => (trimmed, false),
    };
    let parsed: f64 = number.parse().ok()?;
    if !parsed.is_finite() {
        return None;
    }
    let fraction = if percent || parsed > 1.0 {
        parsed / 100.0
    } else {
        parsed
    };
    Some(clamp_confidence(fraction))
}

fn split_field(line: &str) -> Option<(String, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim().trim_start_matches(['#', '*']).trim_end_matches('*').trim();
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphabetic() || c == ' ') {
        return None;
    }
    Some((key.to_ascii_uppercase(), value.trim()))
}

fn bullet(line: &str) -> Option<&str> {
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .map(str::trim)
}

fn parse_yes_no(value: &str) -> Option<bool> {
    match value
        .trim()
        .trim_end_matches('.')
        .to_ascii_lowercase()
        .as_str()
    {
        "yes" | "y" | "true" | "agree" => Some(true),
        "no" | "n" | "false" | "disagree" => Some(false),
        _ => None,
    }
}

fn push_non_empty(target: &mut Vec<String>, value: &str) {
    if !value.is_empty() {
        target.push(value.to_string());
    }
}
