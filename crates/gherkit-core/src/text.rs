//! Text utilities shared by the extractors and the renderer
//!
//! Marker detection and template tokens are ASCII, so all case-insensitive
//! matching here is ASCII case folding over bytes. A byte-level match of an
//! ASCII needle always lands on a char boundary, which keeps the slicing
//! below safe for UTF-8 content around it.

/// Gherkin keywords emphasized at the start of a user-story line.
const GHERKIN_KEYWORDS: &[&str] = &["As", "I", "So", "Given", "When", "Then", "And"];

/// Find the first case-insensitive occurrence of `needle` in `haystack`.
pub fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    (0..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

/// Whether `haystack` contains `needle`, ignoring ASCII case.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    find_ci(haystack, needle).is_some()
}

/// Whether `s` starts with `prefix`, ignoring ASCII case.
pub fn starts_with_ci(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len() && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// Replace every case-insensitive occurrence of `token` with `value`.
///
/// Single forward scan: occurrences introduced by `value` itself are not
/// re-expanded, so substitution terminates even when the replacement text
/// contains the token.
pub fn replace_token(template: &str, token: &str, value: &str) -> String {
    if token.is_empty() {
        return template.to_string();
    }
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(i) = find_ci(rest, token) {
        out.push_str(&rest[..i]);
        out.push_str(value);
        rest = &rest[i + token.len()..];
    }
    out.push_str(rest);
    out
}

/// Escape HTML special characters.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Text after the first case-insensitive occurrence of `marker`, trimmed.
///
/// Returns `None` when the marker is absent. The caller decides whether an
/// empty remainder is an error.
pub fn text_after_marker(text: &str, marker: &str) -> Option<String> {
    let trimmed = text.trim();
    let i = find_ci(trimmed, marker)?;
    Some(trimmed[i + marker.len()..].trim().to_string())
}

/// Convert a doc-comment remarks block into report-ready HTML.
///
/// Each line is trimmed and escaped, a leading Gherkin keyword token is
/// wrapped in `<strong>`, and lines are joined with `<br/>` (none after the
/// last line).
pub fn story_to_html(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    trimmed
        .lines()
        .map(|line| emphasize_keyword(line.trim()))
        .collect::<Vec<_>>()
        .join("<br/>")
}

/// Escape a line and bold its leading Gherkin keyword, if any.
///
/// The keyword must be a whole token: "Item" is not an "I" line.
fn emphasize_keyword(line: &str) -> String {
    let escaped = html_escape(line);
    let word_len = escaped
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(escaped.len());
    let (word, rest) = escaped.split_at(word_len);
    if GHERKIN_KEYWORDS.iter().any(|k| word.eq_ignore_ascii_case(k)) {
        format!("<strong>{word}</strong>{rest}")
    } else {
        escaped
    }
}
