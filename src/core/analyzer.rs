/// Metadata analysis for extracted comments
///
/// This module classifies comment records by type, runs best-effort detection
/// of embedded (base64-encoded) payloads, and computes a bounded compliance
/// score over the batch.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::errors::AnalyzerError;
use crate::core::parser::CommentRecord;
use crate::core::patterns;
use crate::utils::logging::ComponentLog;

/// Marker substring searched for, case-insensitively, inside decoded
/// comment payloads.
const ENCODED_MARKER: &str = "claude";

/// Minimum content length before a comment is considered for decoding.
const MIN_ENCODED_LENGTH: usize = 10;

/// Analysis rules supplied by external configuration.
///
/// Read-only for the lifetime of the owning analyzer instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub min_length: usize,
    pub max_length: usize,
    pub required_tags: Vec<String>,
    pub forbidden_patterns: Vec<String>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            min_length: 3,
            max_length: 500,
            required_tags: Vec::new(),
            forbidden_patterns: Vec::new(),
        }
    }
}

impl RuleSet {
    /// Load rules from a JSON file. Missing fields fall back to defaults;
    /// an unreadable or malformed file is a configuration error.
    pub fn from_file(path: &Path) -> Result<Self, AnalyzerError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            AnalyzerError::configuration(format!("Failed to read rules file: {}", e), Some(path))
        })?;

        serde_json::from_str(&raw).map_err(|e| {
            AnalyzerError::configuration(format!("Invalid JSON in rules file: {}", e), Some(path))
        })
    }
}

/// Aggregate analysis over a batch of comment records.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AnalysisResult {
    /// Count of input records.
    pub total_comments: usize,
    /// Occurrence count per comment type tag.
    pub comment_types: HashMap<String, usize>,
    /// Ordered detected-pattern tags; repeated detections appear repeatedly.
    pub patterns_found: Vec<String>,
    /// Bounded compliance score in [0.0, 100.0].
    pub compliance_score: f64,
    /// Reserved extension mapping, unpopulated by the core algorithm.
    pub metadata: Map<String, Value>,
}

/// Analyzes comment batches for type distribution, embedded patterns, and
/// policy compliance.
pub struct MetadataAnalyzer {
    rules: RuleSet,
    /// Reserved for result memoization; not consulted by the scoring path,
    /// so `analyze` stays a pure function of its input.
    #[allow(dead_code)]
    analysis_cache: HashMap<String, AnalysisResult>,
    log: ComponentLog,
}

impl MetadataAnalyzer {
    /// Create an analyzer with the built-in default rule set.
    pub fn new() -> Self {
        Self::with_logger(RuleSet::default(), ComponentLog::new("analyzer"))
    }

    /// Create an analyzer with an explicit rule set.
    pub fn with_rules(rules: RuleSet) -> Self {
        Self::with_logger(rules, ComponentLog::new("analyzer"))
    }

    /// Create an analyzer with explicit rules and log handle.
    pub fn with_logger(rules: RuleSet, log: ComponentLog) -> Self {
        log.info("MetadataAnalyzer initialized");
        Self {
            rules,
            analysis_cache: HashMap::new(),
            log,
        }
    }

    /// Build an analyzer from a rules file, degrading to the default rule
    /// set when the file is missing or malformed.
    pub fn with_rules_file(path: &Path) -> Self {
        let log = ComponentLog::new("analyzer");
        let rules = match RuleSet::from_file(path) {
            Ok(rules) => rules,
            Err(e) => {
                log.warn(&format!("Failed to load rules: {}", e));
                RuleSet::default()
            }
        };
        Self::with_logger(rules, log)
    }

    /// The rule set this analyzer was configured with.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Perform analysis on a batch of extracted comments.
    ///
    /// Two calls with identical input produce identical results.
    pub fn analyze(&self, comments: &[CommentRecord]) -> AnalysisResult {
        let mut results = AnalysisResult {
            total_comments: comments.len(),
            ..AnalysisResult::default()
        };

        for comment in comments {
            *results
                .comment_types
                .entry(comment.comment_type.clone())
                .or_insert(0) += 1;

            self.detect_patterns(comment, &mut results);
        }

        results.compliance_score = Self::calculate_compliance(&results);

        self.log.debug(&format!(
            "Analyzed {} comment(s), compliance {:.1}",
            results.total_comments, results.compliance_score
        ));

        results
    }

    /// Best-effort detection of base64-encoded payloads carrying the marker
    /// substring. Decode failures are swallowed; detection never aborts the
    /// surrounding analysis.
    fn detect_patterns(&self, comment: &CommentRecord, results: &mut AnalysisResult) {
        let content = &comment.content;

        if content.len() <= MIN_ENCODED_LENGTH || !patterns::is_base64_alphabet(content) {
            return;
        }

        let decoded = match base64::engine::general_purpose::STANDARD.decode(content) {
            Ok(bytes) => bytes,
            Err(_) => return,
        };

        let text = match String::from_utf8(decoded) {
            Ok(text) => text,
            Err(_) => return,
        };

        if text.to_lowercase().contains(ENCODED_MARKER) {
            results.patterns_found.push("encoded_message".to_string());
        }
    }

    /// Compliance scoring: start at 100, penalize an empty classification,
    /// reward detections, clamp into [0, 100].
    fn calculate_compliance(results: &AnalysisResult) -> f64 {
        let mut score = 100.0;

        if results.comment_types.is_empty() {
            score -= 50.0;
        }

        score += results.patterns_found.len() as f64 * 5.0;

        score.clamp(0.0, 100.0)
    }
}

impl Default for MetadataAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
