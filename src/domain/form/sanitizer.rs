//! Removes formatting artifacts the model wraps around its JSON answer.
//!
//! Models asked for "raw JSON only" still tend to answer with a fenced
//! markdown block. `sanitize` strips surrounding whitespace and a single
//! leading/trailing fence pair; it does not try to balance or repeatedly
//! strip nested fences.

/// Leading fence with a language tag.
pub const JSON_FENCE: &str = "```json";

/// Bare fence; also the only recognized trailing marker.
pub const FENCE: &str = "```";

/// Returns the candidate JSON text inside `text`.
///
/// Never fails: text without fences comes back trimmed and otherwise unchanged.
pub fn sanitize(text: &str) -> String {
    let trimmed = text.trim();

    let without_leading = trimmed
        .strip_prefix(JSON_FENCE)
        .or_else(|| trimmed.strip_prefix(FENCE))
        .unwrap_or(trimmed);

    let without_trailing = without_leading
        .strip_suffix(FENCE)
        .unwrap_or(without_leading);

    without_trailing.trim().to_string()
}
