//! Text normalization shared by skill matching and the explanation pass.
//!
//! Intent text, skill tokens and roles are compared in a "clean" form:
//! lowercase, with every character outside `[a-z0-9 ]` replaced by a space,
//! so punctuation never blocks a substring match.

use crate::engine::types::Skills;

/// Lowercase `text` and blank out everything that isn't `[a-z0-9 ]`.
///
/// Each replaced character becomes exactly one space; runs are not collapsed.
pub fn clean(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' ' {
                c
            } else {
                ' '
            }
        })
        .collect()
}

/// Split a skills field into ordered skill tokens.
///
/// A string is split on commas with each token trimmed and empty tokens
/// dropped. A list is used verbatim. Duplicates keep their original order.
pub fn split_skills(field: &Skills) -> Vec<String> {
    match field {
        Skills::Missing => Vec::new(),
        Skills::Text(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Skills::List(items) => items.clone(),
    }
}

/// Skills whose clean form occurs inside the already-cleaned intent.
pub fn matched_skills(skills: &[String], clean_intent: &str) -> Vec<String> {
    skills
        .iter()
        .filter(|skill| clean_intent.contains(&clean(skill)))
        .cloned()
        .collect()
}
