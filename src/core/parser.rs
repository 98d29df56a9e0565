/// Comment extraction engine
///
/// This module contains the `Parser` contract and the line-oriented
/// `CommentParser` implementation that turns raw source text into an ordered
/// sequence of typed comment records.

use std::collections::HashMap;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::patterns;
use crate::utils::logging::ComponentLog;

/// One extracted comment occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    /// Tag identifying which pattern matched.
    #[serde(rename = "type")]
    pub comment_type: String,
    /// Trimmed text captured by the pattern's capture group.
    pub content: String,
    /// 1-based source line index.
    pub line_number: usize,
    /// The trimmed original source line.
    pub raw: String,
}

/// Contract implemented by comment extractors.
pub trait Parser {
    /// Extract ordered comment records from raw source text.
    fn parse(&self, content: &str) -> Vec<CommentRecord>;

    /// Structural check that a loosely typed record carries the required
    /// fields. No semantic checking.
    fn validate(&self, record: &Value) -> bool;
}

/// Line-oriented comment extractor.
///
/// Scans text line by line and applies the single-line marker pattern
/// (`#`, `//`, `--`). The block-comment and doc-string patterns are compiled
/// into the table at construction but are not consulted by this scanning
/// loop; a block-aware extractor would be a separate `Parser` implementation.
pub struct CommentParser {
    patterns: HashMap<String, Regex>,
    log: ComponentLog,
}

impl CommentParser {
    /// Create a parser with a default logging target.
    pub fn new() -> Self {
        Self::with_logger(ComponentLog::new("parser"))
    }

    /// Create a parser emitting under an explicitly supplied log handle.
    pub fn with_logger(log: ComponentLog) -> Self {
        let patterns = patterns::compile_comment_patterns(&log);
        log.info("CommentParser initialized");
        Self { patterns, log }
    }
}

impl Default for CommentParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for CommentParser {
    fn parse(&self, content: &str) -> Vec<CommentRecord> {
        if content.is_empty() {
            return Vec::new();
        }

        let mut comments = Vec::new();

        let single_line = match self.patterns.get("single_line") {
            Some(regex) => regex,
            None => {
                self.log.error("single_line pattern unavailable, nothing extracted");
                return comments;
            }
        };

        // Line numbering starts at 1 and is stable across blank lines. The
        // leftmost marker occurrence wins; at most one record per line.
        for (index, line) in content.split('\n').enumerate() {
            if let Some(caps) = single_line.captures(line) {
                let captured = caps.get(1).map(|m| m.as_str()).unwrap_or("");
                comments.push(CommentRecord {
                    comment_type: "single_line".to_string(),
                    content: captured.trim().to_string(),
                    line_number: index + 1,
                    raw: line.trim().to_string(),
                });
            }
        }

        self.log
            .debug(&format!("Extracted {} comment(s)", comments.len()));

        comments
    }

    fn validate(&self, record: &Value) -> bool {
        ["type", "content", "line_number"]
            .iter()
            .all(|field| record.get(field).is_some())
    }
}
