/// Text helper utilities
///
/// String sanitization, whitespace normalization, and metadata tag
/// extraction shared by the rendering layer.

use lazy_static::lazy_static;
use regex::Regex;

/// Longest comment content the default validation rules accept.
pub const MAX_COMMENT_LENGTH: usize = 1000;

/// Output formats understood by the rendering layer.
pub const SUPPORTED_FORMATS: [&str; 4] = ["json", "xml", "csv", "plain"];

lazy_static! {
    static ref CONTROL_CHARS: Regex = Regex::new(r"[\x00-\x1F\x7F-\x9F]").unwrap();
    static ref METADATA_TAG: Regex = Regex::new(r"@(\w+)").unwrap();
}

/// Sanitize text for safe embedding in markup output.
///
/// Strips NUL bytes, escapes markup entities, removes remaining control
/// characters, and trims surrounding whitespace.
pub fn sanitize_input(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let text = text.replace('\u{0}', "");
    let text = escape_entities(&text);
    let text = CONTROL_CHARS.replace_all(&text, "");

    text.trim().to_string()
}

fn escape_entities(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Collapse whitespace runs to single spaces.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract `@tag` style metadata tags, deduplicated in first-seen order.
pub fn extract_metadata_tags(text: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();

    for caps in METADATA_TAG.captures_iter(text) {
        let tag = caps[1].to_string();
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    tags
}
