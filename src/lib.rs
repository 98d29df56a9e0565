/// Comment Analyzer - comment extraction and compliance analysis for source text
///
/// This library extracts comment-like substrings from arbitrary source text
/// using line-comment conventions borrowed from several languages, classifies
/// them, and scores the result set against a small compliance policy.

// Re-export core modules
pub mod core;
pub mod utils;

// Re-export main types for convenience
pub use crate::core::analyzer::{AnalysisResult, MetadataAnalyzer, RuleSet};
pub use crate::core::errors::AnalyzerError;
pub use crate::core::parser::{CommentParser, CommentRecord, Parser};
pub use crate::utils::validators::{CommentValidator, ValidationReport, ValidationRules};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse and analyze a source text blob in one call.
///
/// This is a convenience function for simple use cases; it runs the
/// extraction engine with default settings and analyzes the batch with the
/// built-in rule set.
pub fn analyze_source(content: &str) -> (Vec<CommentRecord>, AnalysisResult) {
    let parser = CommentParser::new();
    let analyzer = MetadataAnalyzer::new();

    let comments = parser.parse(content);
    let analysis = analyzer.analyze(&comments);

    (comments, analysis)
}

/// Pipeline drivers shared by the command-line application and demos.
pub mod app {
    use std::path::Path;

    use anyhow::{Context, Result};
    use serde::Serialize;
    use serde_json::Value;

    use crate::core::analyzer::{AnalysisResult, MetadataAnalyzer};
    use crate::core::parser::{CommentParser, CommentRecord, Parser};
    use crate::utils::validators::{CommentValidator, ValidationReport};

    /// Combined pipeline results for one input.
    #[derive(Debug, Clone, Serialize)]
    pub struct FileReport {
        pub path: String,
        pub comments: Vec<CommentRecord>,
        pub analysis: AnalysisResult,
        pub validation: Vec<ValidationReport>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub error: Option<String>,
    }

    impl FileReport {
        /// Report for an input that could not be read.
        pub fn failed(path: &str, message: String) -> Self {
            Self {
                path: path.to_string(),
                comments: Vec::new(),
                analysis: AnalysisResult::default(),
                validation: Vec::new(),
                error: Some(message),
            }
        }
    }

    /// Run the extraction, analysis, and validation stages over one text
    /// blob. The stages share no mutable state; analyzer and validator see
    /// the same extracted records.
    pub fn process_content(
        path: &str,
        content: &str,
        parser: &CommentParser,
        analyzer: &MetadataAnalyzer,
        validator: &CommentValidator,
    ) -> FileReport {
        let comments = parser.parse(content);
        let analysis = analyzer.analyze(&comments);
        let validation = comments
            .iter()
            .map(|comment| {
                let record = serde_json::to_value(comment).unwrap_or(Value::Null);
                validator.validate(&record)
            })
            .collect();

        FileReport {
            path: path.to_string(),
            comments,
            analysis,
            validation,
            error: None,
        }
    }

    /// Read a file and run the full pipeline over its content.
    pub fn process_file(
        path: &Path,
        parser: &CommentParser,
        analyzer: &MetadataAnalyzer,
        validator: &CommentValidator,
    ) -> Result<FileReport> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read file: {}", path.display()))?;

        Ok(process_content(
            &path.to_string_lossy(),
            &content,
            parser,
            analyzer,
            validator,
        ))
    }
}
