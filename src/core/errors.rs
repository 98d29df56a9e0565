/// Error types for the comment analyzer
///
/// Failure kinds carry a machine-readable code plus kind-specific context.
/// Extraction and analysis degrade gracefully instead of returning these;
/// the typed variants exist for configuration loading and for callers who
/// want fault signaling around the validation entry points.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Comment parsing failed.
    #[error("{message}")]
    Parse {
        message: String,
        line_number: Option<usize>,
    },

    /// Comment validation failed.
    #[error("{message}")]
    Validation {
        message: String,
        rule_name: Option<String>,
    },

    /// Configuration loading or parsing failed.
    #[error("{message}")]
    Configuration {
        message: String,
        source_path: Option<PathBuf>,
    },
}

impl AnalyzerError {
    pub fn parse(message: impl Into<String>, line_number: Option<usize>) -> Self {
        AnalyzerError::Parse {
            message: message.into(),
            line_number,
        }
    }

    pub fn validation(message: impl Into<String>, rule_name: Option<&str>) -> Self {
        AnalyzerError::Validation {
            message: message.into(),
            rule_name: rule_name.map(str::to_string),
        }
    }

    pub fn configuration(message: impl Into<String>, source_path: Option<&Path>) -> Self {
        AnalyzerError::Configuration {
            message: message.into(),
            source_path: source_path.map(Path::to_path_buf),
        }
    }

    /// Machine-readable error code for reporting layers.
    pub fn code(&self) -> &'static str {
        match self {
            AnalyzerError::Parse { .. } => "PARSE_ERROR",
            AnalyzerError::Validation { .. } => "VALIDATION_ERROR",
            AnalyzerError::Configuration { .. } => "CONFIG_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AnalyzerError::parse("bad line", Some(7)).code(), "PARSE_ERROR");
        assert_eq!(
            AnalyzerError::validation("rule failed", Some("min_length")).code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            AnalyzerError::configuration("unreadable", None).code(),
            "CONFIG_ERROR"
        );
    }

    #[test]
    fn test_error_context_is_kept() {
        let err = AnalyzerError::parse("unexpected marker", Some(12));
        match err {
            AnalyzerError::Parse { line_number, .. } => assert_eq!(line_number, Some(12)),
            _ => panic!("expected parse error"),
        }

        let err = AnalyzerError::configuration("missing", Some(Path::new("rules.json")));
        match err {
            AnalyzerError::Configuration { source_path, .. } => {
                assert_eq!(source_path.as_deref(), Some(Path::new("rules.json")));
            }
            _ => panic!("expected configuration error"),
        }
    }

    #[test]
    fn test_error_display_uses_message() {
        let err = AnalyzerError::validation("content too short", Some("min_length"));
        assert_eq!(err.to_string(), "content too short");
    }
}
