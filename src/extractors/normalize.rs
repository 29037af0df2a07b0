// src/extractors/normalize.rs

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Failed to compile WHITESPACE_RUN_RE"));
static DISALLOWED_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9a-zA-Z_]+").expect("Failed to compile DISALLOWED_CHARS_RE"));
static UNDERSCORE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_+").expect("Failed to compile UNDERSCORE_RUN_RE"));

/// Join key between manifest candidates and document entries.
///
/// `Adam_Frisch`, `adam frisch` and `Adam-Frisch.` all map to `adam_frisch`.
/// The function is idempotent.
pub fn normalize_name(name: &str) -> String {
    let s = name.trim().replace('\u{2019}', "");
    let s = s.replace(['.', '-'], "_");
    let s = WHITESPACE_RUN_RE.replace_all(&s, "_");
    let s = DISALLOWED_CHARS_RE.replace_all(&s, "");
    let s = UNDERSCORE_RUN_RE.replace_all(&s, "_");
    s.trim_matches('_').to_lowercase()
}

/// `Adam_Frisch` -> `Adam Frisch`
pub fn display_name(candidate: &str) -> String {
    candidate.replace('_', " ")
}
