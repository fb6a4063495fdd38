//! Plain-text helpers for fixed-metric PDF layout.

/// Points to millimetres.
pub const PT_TO_MM: f32 = 0.352_778;

/// Average glyph advance as a fraction of the font size. Close enough
/// for Helvetica and common sans-serif TrueType faces.
const AVG_ADVANCE_EM: f32 = 0.5;

/// Approximate rendered width of `text` in millimetres.
pub fn text_width_mm(text: &str, size_pt: f32) -> f32 {
    text.chars().count() as f32 * size_pt * AVG_ADVANCE_EM * PT_TO_MM
}

/// How many characters fit on a line `width_mm` wide.
pub fn chars_per_line(width_mm: f32, size_pt: f32) -> usize {
    let advance = size_pt * AVG_ADVANCE_EM * PT_TO_MM;
    if advance <= 0.0 {
        return 1;
    }
    ((width_mm / advance).floor() as usize).max(1)
}

/// Greedy word wrap. Words longer than a line are split.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        if current_len + word.len() + 1 > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Replace characters the built-in PDF fonts cannot encode.
pub fn to_builtin_charset(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2014}' | '\u{2013}' | '\u{2212}' => out.push('-'),
            '\u{2022}' | '\u{00B7}' => out.push('*'),
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2026}' => out.push_str("..."),
            '\u{2192}' => out.push_str("->"),
            '\u{00A0}' => out.push(' '),
            c if c.is_ascii() => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}
