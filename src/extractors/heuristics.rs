// src/extractors/heuristics.rs
//
// Line classifiers used to decide where one candidate's bio ends.
// Kept as named predicates so that document format drift is a local change.

use once_cell::sync::Lazy;
use regex::Regex;

/// Lines at or above this many characters are treated as prose, never as a name.
pub const DEFAULT_MAX_NAME_LINE_CHARS: usize = 50;

// "12. Adam Frisch" -> "Adam Frisch"
static NUMBERED_ENTRY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s+(.+)$").expect("Failed to compile NUMBERED_ENTRY_RE"));

/// Returns the name part of a numbered entry line such as `3. Jane Doe`.
pub fn parse_numbered_entry(line: &str) -> Option<&str> {
    NUMBERED_ENTRY_RE
        .captures(line.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|name| !name.is_empty())
}

/// Does this line look like the start of another candidate's entry?
///
/// A short line (fewer than `max_chars` characters) is name-like when either
/// - it contains an underscore and splits into 2-5 words once underscores
///   become spaces (`Adam_Frisch`), or
/// - it has no underscore, 2-4 words, and every word starts uppercase
///   (`Adam Frisch`).
///
/// Known false positive: a short all-capitalized phrase such as
/// `Harvard Business School` on a line of its own.
pub fn looks_like_candidate_name(line: &str, max_chars: usize) -> bool {
    let line = line.trim();
    if line.is_empty() || line.chars().count() >= max_chars {
        return false;
    }

    if line.contains('_') {
        let words = line.replace('_', " ").split_whitespace().count();
        return (2..=5).contains(&words);
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    (2..=4).contains(&words.len())
        && words
            .iter()
            .all(|w| w.chars().next().is_some_and(char::is_uppercase))
}
