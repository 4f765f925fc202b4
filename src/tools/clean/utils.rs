use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^<>]*>").expect("valid regex"));

static BREAK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(?:p|li|div|h[1-6])\s*>").expect("valid regex")
});

/// Remove anything that looks like a tag. Text between tags is kept as-is.
pub fn strip_tags(text: &str) -> String {
    if !text.contains('<') {
        return text.to_string();
    }
    TAG_REGEX.replace_all(text, " ").to_string()
}

/// Turn `<br>` and closing block tags into newlines before tags are stripped.
pub fn breaks_to_newlines(text: &str) -> String {
    BREAK_REGEX.replace_all(text, "\n").to_string()
}

/// `&amp;` → `&`, `&#x27;` → `'`, named and numeric alike.
pub fn decode_html_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).to_string()
}

/// NFC, so precomposed and combining forms compare equal.
pub fn normalize_unicode(text: &str) -> String {
    text.nfc().collect::<String>()
}

const ZERO_WIDTH: [char; 5] = ['\u{200B}', '\u{200C}', '\u{200D}', '\u{2060}', '\u{FEFF}'];

/// Drop zero-width characters and controls other than `\n` and `\t`.
pub fn remove_invisible_chars(text: &str) -> String {
    text.chars()
        .filter(|c| !ZERO_WIDTH.contains(c))
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\t'))
        .collect()
}

/// Collapse runs of whitespace (including newlines and nbsp) and trim.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").trim().to_string()
}
