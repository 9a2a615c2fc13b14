//! Argument classification into benefits and risks.

/// Which bucket an argument falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    Benefit,
    Risk,
    Neutral,
}

/// Sorts supporting arguments into benefits and risks.
///
/// The consensus builder only depends on this trait, so the keyword
/// heuristic can be replaced without touching scoring or selection.
pub trait ArgumentClassifier: Send + Sync {
    fn classify(&self, argument: &str) -> ArgumentKind;
}

/// Case-insensitive substring matching on fixed keyword lists.
///
/// Benefit keywords are checked first, so an argument mentioning both
/// ("improves the risk profile") counts as a benefit.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    benefit_keywords: Vec<String>,
    risk_keywords: Vec<String>,
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(["benefit", "advantage", "improve"], ["risk", "concern", "issue"])
    }
}

impl KeywordClassifier {
    pub fn new<B, R>(benefit_keywords: B, risk_keywords: R) -> Self
    where
        B: IntoIterator,
        B::Item: AsRef<str>,
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        Self {
            benefit_keywords: benefit_keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
            risk_keywords: risk_keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }
}

impl ArgumentClassifier for KeywordClassifier {
    fn classify(&self, argument: &str) -> ArgumentKind {
        let lower = argument.to_lowercase();
        if self.benefit_keywords.iter().any(|k| lower.contains(k)) {
            ArgumentKind::Benefit
        } else if self.risk_keywords.iter().any(|k| lower.contains(k)) {
            ArgumentKind::Risk
        } else {
            ArgumentKind::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_classifier() {
        let classifier = KeywordClassifier::default();
        assert_eq!(classifier.classify("Improves first-contact resolution"), ArgumentKind::Benefit);
        assert_eq!(classifier.classify("Clear ADVANTAGE for retention"), ArgumentKind::Benefit);
        assert_eq!(classifier.classify("Raises a compliance concern"), ArgumentKind::Risk);
        assert_eq!(classifier.classify("Known issue with billing"), ArgumentKind::Risk);
        assert_eq!(classifier.classify("Customer asked twice"), ArgumentKind::Neutral);
    }

    #[test]
    fn test_benefit_wins_over_risk() {
        let classifier = KeywordClassifier::default();
        assert_eq!(classifier.classify("improves the risk profile"), ArgumentKind::Benefit);
    }

    #[test]
    fn test_custom_keywords() {
        let classifier = KeywordClassifier::new(["upside"], ["downside"]);
        assert_eq!(classifier.classify("Big upside"), ArgumentKind::Benefit);
        assert_eq!(classifier.classify("Some downside"), ArgumentKind::Risk);
        assert_eq!(classifier.classify("improve"), ArgumentKind::Neutral);
    }
}
