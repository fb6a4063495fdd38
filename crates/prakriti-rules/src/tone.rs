//! Second-person to clinician-neutral phrasing.

use std::sync::LazyLock;

use regex::Regex;

static REWRITES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"\b[Yy]ou\s+should\b", "It is recommended to"),
        (r"\b[Yy]ou\s+must\b", "It is recommended to"),
        (r"\b[Yy]ou\s+can\b", "It may be useful to"),
        (r"\b[Yy]ou'?re\b", "the client is"),
        (r"\b[Yy]our\b", "the client's"),
        (r"\b[Yy]ou\b", "the client"),
        (r"\b[Tt]ry\b", "Consider"),
    ]
    .into_iter()
    // Patterns are literals; a failure here is a programming error caught by tests.
    .filter_map(|(pattern, replacement)| Regex::new(pattern).ok().map(|re| (re, replacement)))
    .collect()
});

/// Rewrite "you should", "you", "try" and similar into phrasing addressed
/// to a clinician rather than the client.
pub fn neutralize_tone(text: &str) -> String {
    let mut out = text.to_string();
    for (re, replacement) in REWRITES.iter() {
        out = re.replace_all(&out, *replacement).into_owned();
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pattern_compiles() {
        assert_eq!(REWRITES.len(), 7);
    }
}
