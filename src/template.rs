//! Placeholder extraction and text substitution
//!
//! Templates are plain UTF-8 text containing `{{service:params}}` tokens.
//! Extraction returns each distinct token once, in first-seen order;
//! substitution replaces every literal occurrence in a single pass, so a
//! resolved value that itself contains braces is never re-scanned.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// A placeholder is `{{` + one or more non-brace characters + `}}`.
/// Nested or unbalanced braces do not match.
static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{[^{}]+\}\}").expect("placeholder regex is valid"));

/// Extract the distinct placeholder tokens from `text`, braces included,
/// preserving first-seen order. Duplicate occurrences collapse to one entry.
pub fn extract_placeholders(text: &str) -> Vec<&str> {
    let mut seen = Vec::new();
    for m in PLACEHOLDER_RE.find_iter(text) {
        let token = m.as_str();
        if !seen.contains(&token) {
            seen.push(token);
        }
    }
    seen
}

/// Replace every occurrence of each token with its resolved value.
///
/// `values` must contain an entry for every token in `text`; the renderer
/// guarantees this by resolving the full extracted set first. Tokens are
/// disjoint literal strings, so replacement order cannot matter.
pub fn substitute(text: &str, values: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_end = 0;

    for m in PLACEHOLDER_RE.find_iter(text) {
        out.push_str(&text[last_end..m.start()]);
        match values.get(m.as_str()) {
            Some(value) => out.push_str(value),
            // Unresolved tokens pass through untouched
            None => out.push_str(m.as_str()),
        }
        last_end = m.end();
    }

    out.push_str(&text[last_end..]);
    out
}
