/// Validation utilities
///
/// Free-function checks for comment structure, length bounds, metadata tag
/// shape, and pattern compliance, plus the rule-driven `CommentValidator`
/// engine that produces a scored report.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

lazy_static! {
    static ref TAG_PATTERN: Regex = Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*$").unwrap();
}

const REQUIRED_FIELDS: [&str; 3] = ["type", "content", "line_number"];

/// Validate the structure of a loosely typed comment record.
///
/// Requires the `type`, `content`, and `line_number` keys (checked in that
/// order, first failure wins), an integer line number, and non-empty
/// content. Returns a pass flag plus an optional diagnostic.
pub fn validate_comment_structure(comment: &Value) -> (bool, Option<String>) {
    for field in REQUIRED_FIELDS {
        if comment.get(field).is_none() {
            return (false, Some(format!("Missing required field: {}", field)));
        }
    }

    let line_number_ok = comment
        .get("line_number")
        .map(|v| v.is_u64() || v.is_i64())
        .unwrap_or(false);
    if !line_number_ok {
        return (false, Some("line_number must be an integer".to_string()));
    }

    let content_empty = match comment.get("content") {
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Null) | None => true,
        Some(_) => false,
    };
    if content_empty {
        return (false, Some("Comment content cannot be empty".to_string()));
    }

    (true, None)
}

/// Validate metadata tag format: a letter followed by letters, digits, or
/// underscores. The whole set must pass.
pub fn validate_metadata_tags(tags: &[String]) -> bool {
    tags.iter().all(|tag| TAG_PATTERN.is_match(tag))
}

/// Check that a byte sequence is well-formed UTF-8.
pub fn validate_encoding_bytes(bytes: &[u8]) -> bool {
    std::str::from_utf8(bytes).is_ok()
}

/// Validate comment length against inclusive character-count bounds.
pub fn validate_comment_length(comment: &str, min_length: usize, max_length: usize) -> bool {
    let length = comment.chars().count();
    min_length <= length && length <= max_length
}

/// Return the subset of `patterns` matching somewhere in `content`, in input
/// order. Patterns that fail to compile are logged and skipped.
pub fn validate_pattern_compliance(content: &str, patterns: &[String]) -> Vec<String> {
    let mut found_patterns = Vec::new();

    for pattern in patterns {
        match Regex::new(pattern) {
            Ok(regex) => {
                if regex.is_match(content) {
                    found_patterns.push(pattern.clone());
                }
            }
            Err(e) => {
                log::error!(target: "validators", "Error compiling pattern: {}", e);
            }
        }
    }

    found_patterns
}

/// Validation rules consumed by `CommentValidator`.
///
/// `required_patterns`, `forbidden_patterns`, and `allow_empty` are carried
/// configuration surface not yet consulted by the validation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    pub min_length: usize,
    pub max_length: usize,
    pub required_patterns: Vec<String>,
    pub forbidden_patterns: Vec<String>,
    pub allow_empty: bool,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            min_length: 1,
            max_length: 1000,
            required_patterns: Vec::new(),
            forbidden_patterns: Vec::new(),
            allow_empty: false,
        }
    }
}

/// Structured outcome of a full validation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Starts at 100; fixed penalties per failed category. Unlike the
    /// analyzer's compliance score this value is not clamped.
    pub score: i32,
}

/// Rule-driven comment validation engine.
pub struct CommentValidator {
    rules: ValidationRules,
}

impl CommentValidator {
    /// Create a validator; `None` selects the built-in default rules.
    pub fn new(rules: Option<ValidationRules>) -> Self {
        Self {
            rules: rules.unwrap_or_default(),
        }
    }

    /// The rules this validator was configured with.
    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Perform full validation on a single comment record.
    ///
    /// Structure failure is fatal (error, -50); a length bound failure is a
    /// warning (-10) and leaves the record valid.
    pub fn validate(&self, comment: &Value) -> ValidationReport {
        let mut report = ValidationReport {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            score: 100,
        };

        let (structure_ok, error) = validate_comment_structure(comment);
        if !structure_ok {
            report.valid = false;
            if let Some(error) = error {
                report.errors.push(error);
            }
            report.score -= 50;
        }

        let content = comment.get("content").and_then(Value::as_str).unwrap_or("");
        if !validate_comment_length(content, self.rules.min_length, self.rules.max_length) {
            report.warnings.push(format!(
                "Comment length outside bounds: {}",
                content.chars().count()
            ));
            report.score -= 10;
        }

        report
    }
}

impl Default for CommentValidator {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structure_accepts_complete_record() {
        let comment = json!({"type": "single_line", "content": "Test", "line_number": 1});
        let (ok, message) = validate_comment_structure(&comment);

        assert!(ok);
        assert!(message.is_none());
    }

    #[test]
    fn test_structure_rejects_missing_fields() {
        for field in REQUIRED_FIELDS {
            let mut comment =
                json!({"type": "single_line", "content": "Test", "line_number": 1});
            comment.as_object_mut().unwrap().remove(field);

            let (ok, message) = validate_comment_structure(&comment);
            assert!(!ok);
            assert_eq!(message.unwrap(), format!("Missing required field: {}", field));
        }
    }

    #[test]
    fn test_structure_rejects_non_integer_line_number() {
        let comment = json!({"type": "single_line", "content": "Test", "line_number": "1"});
        let (ok, message) = validate_comment_structure(&comment);

        assert!(!ok);
        assert_eq!(message.unwrap(), "line_number must be an integer");
    }

    #[test]
    fn test_structure_rejects_empty_content() {
        let comment = json!({"type": "single_line", "content": "", "line_number": 1});
        let (ok, message) = validate_comment_structure(&comment);

        assert!(!ok);
        assert_eq!(message.unwrap(), "Comment content cannot be empty");
    }

    #[test]
    fn test_metadata_tags() {
        let good = vec!["todo".to_string(), "fixme_2".to_string(), "A1".to_string()];
        assert!(validate_metadata_tags(&good));

        assert!(!validate_metadata_tags(&["2bad".to_string()]));
        assert!(!validate_metadata_tags(&["has-dash".to_string()]));
        assert!(!validate_metadata_tags(&["".to_string()]));
        assert!(validate_metadata_tags(&[]));
    }

    #[test]
    fn test_encoding_bytes() {
        assert!(validate_encoding_bytes("plain ascii".as_bytes()));
        assert!(validate_encoding_bytes("naïve café".as_bytes()));
        assert!(!validate_encoding_bytes(&[0xff, 0xfe, 0x00]));
    }

    #[test]
    fn test_comment_length_bounds() {
        assert!(validate_comment_length("ab", 1, 1000));
        assert!(!validate_comment_length("", 1, 1000));
        // Bounds are inclusive on both ends.
        assert!(validate_comment_length("abc", 3, 3));
        assert!(!validate_comment_length("abcd", 1, 3));
    }

    #[test]
    fn test_pattern_compliance_preserves_order() {
        let patterns = vec![r"\d+".to_string(), "TODO".to_string(), "absent".to_string()];
        let found = validate_pattern_compliance("TODO 123", &patterns);

        assert_eq!(found, vec![r"\d+".to_string(), "TODO".to_string()]);
    }

    #[test]
    fn test_pattern_compliance_skips_invalid_pattern() {
        let patterns = vec!["(unclosed".to_string(), "ok".to_string()];
        let found = validate_pattern_compliance("ok then", &patterns);

        assert_eq!(found, vec!["ok".to_string()]);
    }

    #[test]
    fn test_validator_passes_clean_record() {
        let validator = CommentValidator::new(None);
        let comment = json!({"type": "single_line", "content": "fine", "line_number": 3});
        let report = validator.validate(&comment);

        assert!(report.valid);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
        assert_eq!(report.score, 100);
    }

    #[test]
    fn test_validator_structure_failure_cascades_to_length() {
        let validator = CommentValidator::new(None);
        let comment = json!({"type": "single_line", "line_number": 3});
        let report = validator.validate(&comment);

        // Missing content costs 50, and the empty fallback content also
        // misses the default minimum length for another 10.
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.score, 40);
    }

    #[test]
    fn test_validator_length_warning_is_non_fatal() {
        let rules = ValidationRules {
            max_length: 4,
            ..ValidationRules::default()
        };
        let validator = CommentValidator::new(Some(rules));
        let comment = json!({"type": "single_line", "content": "too long", "line_number": 1});
        let report = validator.validate(&comment);

        assert!(report.valid);
        assert!(report.errors.is_empty());
        assert_eq!(report.warnings, vec!["Comment length outside bounds: 8"]);
        assert_eq!(report.score, 90);
    }

    #[test]
    fn test_default_validation_rules() {
        let rules = ValidationRules::default();
        assert_eq!(rules.min_length, 1);
        assert_eq!(rules.max_length, 1000);
        assert!(!rules.allow_empty);
    }
}
