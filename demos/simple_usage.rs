/// Simple example demonstrating how to use the Comment Analyzer library

use comment_analyzer::utils::output_formatter::format_output;
use comment_analyzer::analyze_source;

fn main() {
    // Inline sample mixing several comment dialects
    let source = r#"
# This is a Python comment
def hello_world():
    print("Hello, World!")  # Inline comment

// JavaScript style comment
let x = 1; -- and a SQL-style marker
"#;

    println!("Analyzing sample source...");

    let (comments, analysis) = analyze_source(source);

    println!("\nExtracted {} comments:", comments.len());
    for comment in &comments {
        println!("  line {:>2}: {}", comment.line_number, comment.content);
    }

    match serde_json::to_value(&analysis) {
        Ok(value) => println!("\nAnalysis:\n{}", format_output(&value, "json")),
        Err(e) => eprintln!("Could not serialize analysis: {}", e),
    }
}
