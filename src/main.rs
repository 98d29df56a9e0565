/// Comment Analyzer - comment extraction and compliance analysis for source text
///
/// The main entry point for the comment analyzer application. It parses
/// command-line arguments, gathers input files, and coordinates the
/// extraction/analysis/validation pipeline across them.

use anyhow::Result;
use clap::{ArgAction, ArgGroup, Parser as ClapParser};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn, LevelFilter};
use rayon::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use comment_analyzer::app::{self, FileReport};
use comment_analyzer::utils::output_formatter;
use comment_analyzer::{CommentParser, CommentValidator, MetadataAnalyzer, ValidationRules};

/// Command line argument structure
#[derive(ClapParser, Debug)]
#[command(
    name = "comment_analyzer",
    version,
    about = "A comment extraction and compliance analysis tool for source text",
    long_about = "This tool extracts comment-like substrings from source files and scores them:
- Line comments in several dialects (#, //, --)
- Detection of base64-encoded payloads hidden in comments
- Compliance scoring against a configurable rule set
- Structural validation with per-record reports"
)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .args(["file_paths", "dir"]),
))]
struct Args {
    /// Path(s) to the file(s) to analyze
    #[arg(name = "file_paths")]
    file_paths: Vec<String>,

    /// Analyze all files in directory (recursively)
    #[arg(long = "dir")]
    dir: Option<String>,

    /// Exclude file pattern (glob syntax, can be used multiple times)
    #[arg(long = "exclude", action = ArgAction::Append)]
    exclude: Option<Vec<String>>,

    /// Include only file pattern (glob syntax, can be used multiple times)
    #[arg(long = "include", action = ArgAction::Append)]
    include: Option<Vec<String>>,

    /// Maximum file size to analyze in MB (default: 10)
    #[arg(long = "max-size", default_value = "10")]
    max_size: usize,

    /// Maximum number of files to analyze (default: 1000)
    #[arg(long = "max-files", default_value = "1000")]
    max_files: usize,

    /// Path to a JSON rule file for the analyzer and validator
    #[arg(long = "rules")]
    rules: Option<String>,

    /// Output in markdown format (wrapped in triple backticks)
    #[arg(long = "md", action = ArgAction::SetTrue)]
    md: bool,

    /// Export results to JSON file
    #[arg(long = "json")]
    json: Option<String>,

    /// Export results to XML file
    #[arg(long = "xml")]
    xml: Option<String>,

    /// Export comment records to CSV file
    #[arg(long = "csv")]
    csv: Option<String>,

    /// Directory to store all output files
    #[arg(long = "output-dir")]
    output_dir: Option<String>,

    /// Suppress terminal output
    #[arg(long = "quiet", action = ArgAction::SetTrue)]
    quiet: bool,

    /// Show only summary information
    #[arg(long = "summary-only", action = ArgAction::SetTrue)]
    summary_only: bool,

    /// Number of parallel workers (0=auto, default: auto)
    #[arg(long = "parallel", default_value = "0")]
    parallel: usize,

    /// Set logging level (default: INFO)
    #[arg(long = "log-level", default_value = "info")]
    log_level: LevelFilter,

    /// Log file path (default: stderr)
    #[arg(long = "log-file")]
    log_file: Option<String>,
}

/// Main entry point function
fn main() -> Result<()> {
    // Record the start time
    let start_time = Instant::now();

    // Parse command line arguments
    let args = Args::parse();

    // Set up logging
    setup_logging(&args);

    // Get files to analyze
    let files_to_analyze = get_files_to_analyze(&args);

    if files_to_analyze.is_empty() {
        eprintln!("{}", "Error: No files specified or found for analysis".red());
        eprintln!("Run with --help for usage information");
        process::exit(1);
    }

    // Analyze all files
    let all_reports = analyze_files(&files_to_analyze, &args)?;

    // Export results if requested
    export_all_results(&all_reports, &args)?;

    // Print results to console if not in quiet mode
    if !args.quiet {
        if !args.summary_only {
            for report in &all_reports {
                println!("\n{}", "=".repeat(80).bold());
                println!("{} {}", "Results for:".cyan(), report.path);
                println!("{}", "=".repeat(80).bold());

                let formatted = output_formatter::format_report(report, args.md);
                println!("{}", formatted);
            }
        }

        let elapsed_time = start_time.elapsed();
        println!("\n{}", output_formatter::create_summary(&all_reports));
        println!(
            "{} {:.2} seconds",
            "Time elapsed:".green(),
            elapsed_time.as_secs_f64()
        );
    }

    Ok(())
}

/// Set up logging with console or file output
fn setup_logging(args: &Args) {
    let mut builder = env_logger::Builder::new();

    // Set log level from arguments
    builder.filter_level(args.log_level);

    // Set format
    builder.format(|buf, record| {
        use chrono::Local;
        use std::io::Write;
        writeln!(
            buf,
            "{} - {} - {} - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    // Redirect to a file when requested
    if let Some(log_file) = &args.log_file {
        match File::create(log_file) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("Could not create log file {}: {}", log_file, e),
        }
    }

    // Initialize logger
    let _ = builder.try_init();
}

/// Load validation rules from the rule file, falling back to defaults.
fn load_validation_rules(path: Option<&str>) -> ValidationRules {
    let path = match path {
        Some(path) => path,
        None => return ValidationRules::default(),
    };

    match std::fs::read_to_string(path) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(rules) => {
                info!("Loaded validation rules from {}", path);
                rules
            }
            Err(e) => {
                error!("Invalid JSON in rules file {}: {}", path, e);
                ValidationRules::default()
            }
        },
        Err(e) => {
            error!("Failed to read rules file {}: {}", path, e);
            ValidationRules::default()
        }
    }
}

/// Get list of files to analyze based on command line arguments
fn get_files_to_analyze(args: &Args) -> Vec<PathBuf> {
    let mut files_to_analyze = Vec::new();
    let max_files = args.max_files;
    let max_size_bytes = args.max_size as u64 * 1024 * 1024;

    // Process individual files
    for file_path in &args.file_paths {
        let path = PathBuf::from(file_path);
        if !path.exists() {
            error!("File not found: {}", path.display());
            continue;
        }
        if !path.is_file() {
            warn!("Skipping {}: not a file", path.display());
            continue;
        }
        match path.metadata() {
            Ok(metadata) => {
                if metadata.len() <= max_size_bytes {
                    files_to_analyze.push(path);
                } else {
                    warn!(
                        "Skipping {}: exceeds maximum file size ({:.2} MB)",
                        path.display(),
                        metadata.len() as f64 / 1024.0 / 1024.0
                    );
                }
            }
            Err(e) => error!("Error reading metadata for {}: {}", path.display(), e),
        }
    }

    // Process directory recursively
    if let Some(dir_path) = &args.dir {
        let dir_path = PathBuf::from(dir_path);
        if !dir_path.is_dir() {
            error!("Directory not found: {}", dir_path.display());
        } else {
            let include_patterns = args.include.clone().unwrap_or_else(|| vec!["*".to_string()]);
            let exclude_patterns = args.exclude.clone().unwrap_or_default();

            for entry in walkdir::WalkDir::new(&dir_path)
                .follow_links(false)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                if files_to_analyze.len() >= max_files {
                    warn!("Reached maximum file limit ({})", max_files);
                    break;
                }

                let file_path = entry.path();
                if !file_path.is_file() {
                    continue;
                }

                match file_path.metadata() {
                    Ok(metadata) => {
                        if metadata.len() > max_size_bytes {
                            continue;
                        }

                        let file_name = file_path.to_string_lossy();
                        let include_match = include_patterns
                            .iter()
                            .any(|pattern| glob_match(&file_name, pattern));
                        let exclude_match = exclude_patterns
                            .iter()
                            .any(|pattern| glob_match(&file_name, pattern));

                        if include_match && !exclude_match {
                            files_to_analyze.push(file_path.to_path_buf());
                        }
                    }
                    Err(e) => error!("Error reading metadata for {}: {}", file_path.display(), e),
                }
            }
        }
    }

    files_to_analyze
}

/// Simple glob pattern matching over full paths
fn glob_match(text: &str, pattern: &str) -> bool {
    let pattern = regex::escape(pattern).replace(r"\*", ".*").replace(r"\?", ".");
    match regex::Regex::new(&format!("^.*{}$", pattern)) {
        Ok(re) => re.is_match(text),
        Err(_) => false,
    }
}

/// Analyze multiple files with progress tracking
fn analyze_files(files: &[PathBuf], args: &Args) -> Result<Vec<FileReport>> {
    let total_files = files.len();

    // Determine number of workers for parallel processing
    let num_workers = if args.parallel == 0 {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    } else {
        args.parallel
    };

    if !args.quiet {
        println!(
            "\n{} {} files with {} workers...",
            "Analyzing".bold(),
            total_files,
            num_workers
        );
    }

    // The pipeline components are immutable after construction, so one
    // instance of each is shared across workers.
    let parser = CommentParser::new();
    let analyzer = match &args.rules {
        Some(path) => MetadataAnalyzer::with_rules_file(Path::new(path)),
        None => MetadataAnalyzer::new(),
    };
    let validator = CommentValidator::new(Some(load_validation_rules(args.rules.as_deref())));

    // Set up progress bar if not in quiet mode
    let progress_bar = if !args.quiet {
        let pb = ProgressBar::new(total_files as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({eta})")
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    // Create a local thread pool instead of using the global one
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_workers)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build thread pool: {}", e))?;

    // Process files in parallel using the local pool; collect preserves
    // input order.
    let all_reports: Vec<FileReport> = pool.install(|| {
        files
            .par_iter()
            .map(|file_path| {
                let report =
                    match app::process_file(file_path, &parser, &analyzer, &validator) {
                        Ok(report) => report,
                        Err(e) => {
                            error!("Error analyzing {}: {}", file_path.display(), e);
                            FileReport::failed(&file_path.to_string_lossy(), e.to_string())
                        }
                    };

                if let Some(pb) = &progress_bar {
                    pb.inc(1);
                }

                report
            })
            .collect()
    });

    // Finish progress bar
    if let Some(pb) = progress_bar {
        pb.finish_with_message("Analysis complete");
    }

    Ok(all_reports)
}

/// Export results for all analyzed files based on command line arguments
fn export_all_results(all_reports: &[FileReport], args: &Args) -> Result<()> {
    // Create output directory if specified
    if let Some(output_dir) = &args.output_dir {
        std::fs::create_dir_all(output_dir)?;
    }

    for report in all_reports {
        let file_path = Path::new(&report.path);

        if let Some(json_path) = &args.json {
            let json_path = if all_reports.len() > 1 {
                generate_output_path(args, file_path, ".json")
            } else {
                PathBuf::from(json_path)
            };
            output_formatter::export_report_json(report, &json_path)?;
        }

        if let Some(xml_path) = &args.xml {
            let xml_path = if all_reports.len() > 1 {
                generate_output_path(args, file_path, ".xml")
            } else {
                PathBuf::from(xml_path)
            };
            output_formatter::export_report_xml(report, &xml_path)?;
        }

        if let Some(csv_path) = &args.csv {
            let csv_path = if all_reports.len() > 1 {
                generate_output_path(args, file_path, ".csv")
            } else {
                PathBuf::from(csv_path)
            };
            output_formatter::export_comments_csv(report, &csv_path)?;
        }
    }

    Ok(())
}

/// Generate output file path based on input file and output directory
fn generate_output_path(args: &Args, file_path: &Path, extension: &str) -> PathBuf {
    let file_stem = file_path.file_stem().unwrap_or_default();
    let output_filename = format!("{}_analysis{}", file_stem.to_string_lossy(), extension);

    if let Some(output_dir) = &args.output_dir {
        PathBuf::from(output_dir).join(output_filename)
    } else {
        PathBuf::from(output_filename)
    }
}
