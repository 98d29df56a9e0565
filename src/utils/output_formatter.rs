/// Output formatter for analysis results
///
/// This module handles formatting and exporting pipeline results in various
/// formats, including console output, JSON, XML, and CSV.

use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::Value;

use crate::app::FileReport;
use crate::utils::helpers::{extract_metadata_tags, normalize_whitespace, sanitize_input};
use crate::utils::validators::validate_metadata_tags;

/// Format arbitrary result data according to the requested type.
///
/// `json` renders pretty-printed JSON, `xml` a simplified element tree; any
/// other type falls back to a plain compact rendering.
pub fn format_output(data: &Value, format_type: &str) -> String {
    match format_type {
        "json" => serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string()),
        "xml" => value_to_xml(data, "root"),
        _ => data.to_string(),
    }
}

/// Convert a JSON value to a simplified XML string.
///
/// Scalar text is entity-escaped; nested objects recurse with their key as
/// the element name, and array elements repeat the key per item.
pub fn value_to_xml(value: &Value, root_name: &str) -> String {
    let mut parts = vec![format!("<{}>", root_name)];

    match value {
        Value::Object(map) => {
            for (key, child) in map {
                match child {
                    Value::Object(_) => parts.push(value_to_xml(child, key)),
                    Value::Array(items) => {
                        for item in items {
                            if item.is_object() {
                                parts.push(value_to_xml(item, key));
                            } else {
                                parts.push(format!("<{}>{}</{}>", key, xml_text(item), key));
                            }
                        }
                    }
                    _ => parts.push(format!("<{}>{}</{}>", key, xml_text(child), key)),
                }
            }
        }
        _ => parts.push(xml_text(value)),
    }

    parts.push(format!("</{}>", root_name));
    parts.join("\n")
}

fn xml_text(value: &Value) -> String {
    match value {
        Value::String(s) => sanitize_input(s),
        other => other.to_string(),
    }
}

/// Format a single file's pipeline results for console output.
pub fn format_report(report: &FileReport, use_markdown: bool) -> String {
    let mut output = String::new();

    if use_markdown {
        output.push_str("```\n");
    }

    if let Some(error) = &report.error {
        output.push_str(&format!("{} {}\n", "Error:".red().bold(), error));
        if use_markdown {
            output.push_str("```\n");
        }
        return output;
    }

    output.push_str(&format!("{}\n", "Extracted Comments".yellow().bold()));
    if report.comments.is_empty() {
        output.push_str("  (none)\n\n");
    } else {
        for comment in &report.comments {
            output.push_str(&format!(
                "  {} {} [{}]\n",
                format!("line {:>4}:", comment.line_number).cyan(),
                normalize_whitespace(&comment.content),
                comment.comment_type
            ));
        }
        output.push('\n');
    }

    output.push_str(&format!("{}\n", "Analysis".yellow().bold()));
    output.push_str(&format!(
        "  {} {}\n",
        "Total comments:".cyan().bold(),
        report.analysis.total_comments
    ));

    let mut types: Vec<_> = report.analysis.comment_types.iter().collect();
    types.sort();
    for (tag, count) in types {
        output.push_str(&format!("    - {}: {}\n", tag, count));
    }

    if !report.analysis.patterns_found.is_empty() {
        output.push_str(&format!(
            "  {} {}\n",
            "Patterns found:".cyan().bold(),
            report.analysis.patterns_found.join(", ")
        ));
    }
    output.push_str(&format!(
        "  {} {:.1}\n\n",
        "Compliance score:".cyan().bold(),
        report.analysis.compliance_score
    ));

    let tags = collect_metadata_tags(report);
    if !tags.is_empty() {
        output.push_str(&format!("{}\n", "Metadata Tags".yellow().bold()));
        for tag in &tags {
            output.push_str(&format!("  - @{}\n", tag));
        }
        output.push('\n');
    }

    output.push_str(&format!("{}\n", "Validation".yellow().bold()));
    let invalid = report.validation.iter().filter(|r| !r.valid).count();
    output.push_str(&format!(
        "  {} {} valid, {} invalid\n",
        "Records:".cyan().bold(),
        report.validation.len() - invalid,
        invalid
    ));

    for (comment, record_report) in report.comments.iter().zip(&report.validation) {
        for error in &record_report.errors {
            output.push_str(&format!(
                "    {} line {}: {}\n",
                "error".red().bold(),
                comment.line_number,
                error
            ));
        }
        for warning in &record_report.warnings {
            output.push_str(&format!(
                "    {} line {}: {}\n",
                "warning".yellow(),
                comment.line_number,
                warning
            ));
        }
    }

    if use_markdown {
        output.push_str("```\n");
    }

    output
}

/// Well-formed `@tag` metadata found across a report's comments.
fn collect_metadata_tags(report: &FileReport) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();

    for comment in &report.comments {
        for tag in extract_metadata_tags(&comment.content) {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
    }

    tags.retain(|tag| validate_metadata_tags(std::slice::from_ref(tag)));
    tags
}

/// Export a file report to a JSON file.
pub fn export_report_json(report: &FileReport, output_path: &Path) -> Result<()> {
    let file = File::create(output_path).context(format!(
        "Failed to create JSON output file: {}",
        output_path.display()
    ))?;

    serde_json::to_writer_pretty(file, report).context("Failed to write JSON data")?;

    Ok(())
}

/// Export a file report to a simplified XML file.
pub fn export_report_xml(report: &FileReport, output_path: &Path) -> Result<()> {
    let value = serde_json::to_value(report).context("Failed to serialize report")?;
    let xml = value_to_xml(&value, "report");

    let mut file = File::create(output_path).context(format!(
        "Failed to create XML output file: {}",
        output_path.display()
    ))?;

    file.write_all(xml.as_bytes())
        .context("Failed to write XML data")?;

    Ok(())
}

/// Export a file report's comment records to a CSV file.
pub fn export_comments_csv(report: &FileReport, output_path: &Path) -> Result<()> {
    let file = File::create(output_path).context(format!(
        "Failed to create CSV output file: {}",
        output_path.display()
    ))?;

    let mut writer = csv::Writer::from_writer(file);

    writer
        .write_record(["line_number", "type", "content", "raw"])
        .context("Failed to write CSV header")?;

    for comment in &report.comments {
        writer
            .write_record([
                comment.line_number.to_string().as_str(),
                comment.comment_type.as_str(),
                comment.content.as_str(),
                comment.raw.as_str(),
            ])
            .context("Failed to write CSV record")?;
    }

    writer.flush().context("Failed to flush CSV writer")?;

    Ok(())
}

/// Create a summary of results across multiple files.
pub fn create_summary(all_reports: &[FileReport]) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n\n", "Analysis Summary".yellow().bold()));
    output.push_str(&format!("Files analyzed: {}\n", all_reports.len()));

    let failed = all_reports.iter().filter(|r| r.error.is_some()).count();
    if failed > 0 {
        output.push_str(&format!("Files failed: {}\n", failed));
    }

    let total_comments: usize = all_reports.iter().map(|r| r.analysis.total_comments).sum();
    output.push_str(&format!("Total comments: {}\n", total_comments));

    let total_patterns: usize = all_reports
        .iter()
        .map(|r| r.analysis.patterns_found.len())
        .sum();
    output.push_str(&format!("Patterns detected: {}\n", total_patterns));

    let analyzed: Vec<_> = all_reports.iter().filter(|r| r.error.is_none()).collect();
    if !analyzed.is_empty() {
        let average = analyzed
            .iter()
            .map(|r| r.analysis.compliance_score)
            .sum::<f64>()
            / analyzed.len() as f64;
        output.push_str(&format!("Average compliance score: {:.1}\n", average));
    }

    let mut type_counts: HashMap<String, usize> = HashMap::new();
    for report in all_reports {
        for (tag, count) in &report.analysis.comment_types {
            *type_counts.entry(tag.clone()).or_insert(0) += count;
        }
    }

    if !type_counts.is_empty() {
        output.push_str(&format!("\n{}\n", "Comment Types".cyan().bold()));

        let mut entries: Vec<_> = type_counts.into_iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        for (i, (tag, count)) in entries.iter().enumerate() {
            output.push_str(&format!("{}. {}: {}\n", i + 1, tag, count));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::process_content;
    use crate::core::analyzer::MetadataAnalyzer;
    use crate::core::parser::CommentParser;
    use crate::utils::validators::CommentValidator;
    use serde_json::json;

    fn sample_report() -> FileReport {
        let parser = CommentParser::new();
        let analyzer = MetadataAnalyzer::new();
        let validator = CommentValidator::new(None);
        process_content(
            "sample.py",
            "# @todo tighten bounds\nx = 1  // checked\n",
            &parser,
            &analyzer,
            &validator,
        )
    }

    #[test]
    fn test_value_to_xml_simple_object() {
        let value = json!({"a": 1});
        assert_eq!(value_to_xml(&value, "root"), "<root>\n<a>1</a>\n</root>");
    }

    #[test]
    fn test_value_to_xml_escapes_text() {
        let value = json!({"a": "<b> & 'c'"});
        let xml = value_to_xml(&value, "root");

        assert!(xml.contains("&lt;b&gt; &amp; &#x27;c&#x27;"));
        assert!(!xml.contains("<b>"));
    }

    #[test]
    fn test_value_to_xml_repeats_array_key() {
        let value = json!({"item": [1, 2]});
        let xml = value_to_xml(&value, "root");

        assert!(xml.contains("<item>1</item>"));
        assert!(xml.contains("<item>2</item>"));
    }

    #[test]
    fn test_format_output_dispatch() {
        let value = json!({"total_comments": 2});

        let as_json = format_output(&value, "json");
        assert!(as_json.contains("\"total_comments\": 2"));

        let as_xml = format_output(&value, "xml");
        assert!(as_xml.contains("<total_comments>2</total_comments>"));

        let as_plain = format_output(&value, "plain");
        assert!(as_plain.contains("total_comments"));
    }

    #[test]
    fn test_format_report_sections() {
        let report = sample_report();
        let formatted = format_report(&report, false);

        assert!(formatted.contains("Extracted Comments"));
        assert!(formatted.contains("Total comments:"));
        assert!(formatted.contains("Compliance score:"));
        assert!(formatted.contains("Validation"));
        assert!(formatted.contains("@todo"));
    }

    #[test]
    fn test_format_report_markdown_fences() {
        let report = sample_report();
        let formatted = format_report(&report, true);

        assert!(formatted.starts_with("```\n"));
        assert!(formatted.ends_with("```\n"));
    }

    #[test]
    fn test_format_report_for_failed_file() {
        let report = FileReport::failed("gone.py", "No such file".to_string());
        let formatted = format_report(&report, false);

        assert!(formatted.contains("No such file"));
        assert!(!formatted.contains("Extracted Comments"));
    }

    #[test]
    fn test_create_summary_counts() {
        let reports = vec![sample_report(), sample_report()];
        let summary = create_summary(&reports);

        assert!(summary.contains("Files analyzed: 2"));
        assert!(summary.contains("Total comments: 4"));
        assert!(summary.contains("single_line: 4"));
        assert!(summary.contains("Average compliance score: 100.0"));
    }
}
