//! String utilities for the domain layer.

/// Normalize a stance for equality comparison.
///
/// Case-folds, drops every character that is neither alphanumeric nor
/// whitespace (Unicode punctuation and symbols included) and collapses
/// whitespace runs, so `"Approve!"`, `"“Approve…”"` and `"  APPROVE. "`
/// all compare equal.
/// Applying it to its own output is a no-op.
pub fn normalize_stance(stance: &str) -> String {
    stance
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Mean of a sequence, `0.0` when empty.
pub fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}
