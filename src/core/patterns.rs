/// Pattern definitions for the comment analyzer
///
/// This module contains the regex sources used to recognize comment markers
/// in raw source text, along with helpers to compile them per parser
/// instance.

use std::collections::HashMap;

use regex::Regex;

use crate::utils::logging::ComponentLog;

/// Characters permitted in standard base64 text.
pub const BASE64_CHARSET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/=";

/// Regex sources for the comment dialects recognized by the parser.
///
/// Keys are the type tags stored on extracted records. The parser applies
/// only `single_line` in its scanning loop; `multi_line` and `doc_string`
/// are compiled alongside it for block-aware extractor variants.
pub fn comment_patterns() -> HashMap<String, String> {
    let mut patterns = HashMap::new();

    // Line comments in the style of shell/Python, C-family, and SQL
    patterns.insert(
        "single_line".to_string(),
        r"(?:#|//|--)\s*(.*)$".to_string(),
    );
    patterns.insert(
        "multi_line".to_string(),
        r"(?s)/\*\s*(.*?)\s*\*/".to_string(),
    );
    patterns.insert(
        "doc_string".to_string(),
        r#"(?s)"""(.*?)""""#.to_string(),
    );

    patterns
}

/// Compile a single pattern, logging and skipping on failure.
pub fn compile_pattern(pattern: &str, log: &ComponentLog) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            log.error(&format!("Error compiling pattern: {}", e));
            None
        }
    }
}

/// Compile the full comment pattern table for one parser instance.
pub fn compile_comment_patterns(log: &ComponentLog) -> HashMap<String, Regex> {
    let mut compiled = HashMap::new();

    for (name, pattern) in comment_patterns() {
        if let Some(regex) = compile_pattern(&pattern, log) {
            compiled.insert(name, regex);
        }
    }

    compiled
}

/// Check whether every character of a string belongs to the base64 alphabet.
///
/// This is the cheap charset gate applied before attempting a real decode;
/// it accepts strings that strict decoding will still reject (for example
/// misplaced padding).
pub fn is_base64_alphabet(string: &str) -> bool {
    !string.is_empty() && string.chars().all(|c| BASE64_CHARSET.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_table_is_complete() {
        let patterns = comment_patterns();
        assert_eq!(patterns.len(), 3);
        assert!(patterns.contains_key("single_line"));
        assert!(patterns.contains_key("multi_line"));
        assert!(patterns.contains_key("doc_string"));
    }

    #[test]
    fn test_all_patterns_compile() {
        let log = ComponentLog::new("test");
        let compiled = compile_comment_patterns(&log);
        assert_eq!(compiled.len(), 3);
    }

    #[test]
    fn test_invalid_pattern_is_skipped() {
        let log = ComponentLog::new("test");
        assert!(compile_pattern(r"(unclosed", &log).is_none());
        assert!(compile_pattern(r"#\s*(.*)", &log).is_some());
    }

    #[test]
    fn test_base64_alphabet_check() {
        assert!(is_base64_alphabet("aGVsbG8gd29ybGQ="));
        assert!(!is_base64_alphabet("not base64!"));
        assert!(!is_base64_alphabet("with space "));
        assert!(!is_base64_alphabet(""));
    }
}
