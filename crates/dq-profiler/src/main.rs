//! CLI entry point for the data quality profiler.

use anyhow::{Result, anyhow};
use clap::Parser;
use dq_profiler::{
    ColumnExtension, ColumnProfile, ProfileResult, ProfilerConfig, ProfilingPipeline,
    ReportGenerator,
};
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Statistical profiling and data quality summary for CSV files",
    long_about = "Profiles every column of a CSV file, detects and converts date columns, \
                  and summarizes missing values and duplicate rows.\n\n\
                  EXAMPLES:\n  \
                  # Human-readable summary\n  \
                  dq-profiler -i data.csv\n\n  \
                  # JSON profile on stdout\n  \
                  dq-profiler -i data.csv --json\n\n  \
                  # Stricter date detection, report written to results/data_profile.json\n  \
                  dq-profiler -i data.csv --threshold 0.9 -r -o results/"
)]
struct Args {
    /// Path to the CSV file to profile
    #[arg(short, long)]
    input: String,

    /// Output directory for reports
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// JSON configuration file
    ///
    /// Fields that are missing take their defaults. Command line flags
    /// override values from the file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Confidence needed before a column is converted to datetime
    #[arg(long)]
    threshold: Option<f64>,

    /// Number of most frequent values reported for text columns
    #[arg(long)]
    top_values: Option<usize>,

    /// Report date detections without converting any column
    #[arg(long)]
    no_date_conversion: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of human-readable summary
    ///
    /// Disables all progress logs; only outputs the profile.
    /// Useful for piping to other tools: `... --json | jq .data_quality`
    #[arg(long)]
    json: bool,

    /// Write the JSON profile to the output directory
    ///
    /// The report will be saved as <input_name>_profile.json
    #[arg(short = 'r', long)]
    emit_report: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    let config = build_config(&args)?;
    let pipeline = ProfilingPipeline::builder().config(config).build()?;

    info!("Loading dataset from: {}", args.input);
    let result = match pipeline.profile_csv_path(&args.input) {
        Ok(result) => result,
        Err(e) => {
            error!("Profiling failed: {}", e);
            return Err(anyhow!("Profiling failed: {}", e));
        }
    };

    handle_output(&result, &args)
}

/// Merge the optional config file with command line overrides.
fn build_config(args: &Args) -> Result<ProfilerConfig> {
    let base = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            ProfilerConfig::from_json_file(path)?
        }
        None => ProfilerConfig::default(),
    };

    let mut builder = ProfilerConfig::builder()
        .date_detection(base.date_detection)
        .convert_dates(base.convert_dates && !args.no_date_conversion)
        .top_values_limit(args.top_values.unwrap_or(base.top_values_limit));

    if let Some(threshold) = args.threshold {
        builder = builder.date_threshold(threshold);
    }

    Ok(builder.build()?)
}

/// Handle output based on CLI flags.
///
/// Output behavior:
/// - Default: Print human-readable summary to stdout
/// - `--json`: Print JSON to stdout only (no logs)
/// - `--emit-report`: Write JSON profile to file
fn handle_output(result: &ProfileResult, args: &Args) -> Result<()> {
    if args.json {
        println!("{}", ReportGenerator::to_json(result, true)?);
        return Ok(());
    }

    if args.emit_report {
        let input_stem = extract_file_stem(&args.input);
        let generator = ReportGenerator::new(PathBuf::from(&args.output));
        let report_path = generator.write_report_to_file(result, &input_stem)?;
        info!("Report written to: {}", report_path.display());
    }

    print_human_readable_summary(result);

    Ok(())
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

/// Print a human-readable summary of the profile.
///
/// Note: This function uses `println!` intentionally for user-facing CLI output.
/// It should always be visible regardless of log level settings.
fn print_human_readable_summary(result: &ProfileResult) {
    let info = &result.file_info;

    println!();
    println!("{}", "=".repeat(80));
    println!("PROFILE: {}", info.filename);
    println!("{}", "=".repeat(80));
    println!();
    println!("  Rows: {}", info.rows);
    println!("  Columns: {}", info.columns);
    println!();

    println!("COLUMNS");
    println!("{}", "-".repeat(80));
    println!(
        "  {:<24} {:<14} {:>8} {:>8} {:>8}  Summary",
        "Name", "Type", "Nulls", "Null %", "Unique"
    );
    for name in &info.column_names {
        if let Some(column) = result.column_analysis.get(name) {
            println!(
                "  {:<24} {:<14} {:>8} {:>7.1}% {:>8}  {}",
                truncate_str(name, 24),
                truncate_str(&column.data_type, 14),
                column.null_count,
                column.null_percentage,
                column.unique_values,
                column_summary(column)
            );
        }
    }
    println!();

    let detection = &result.date_detection;
    if !detection.detected_columns.is_empty() {
        println!("DATE DETECTION");
        println!("{}", "-".repeat(80));
        for (name, verdict) in &detection.detected_columns {
            let marker = if detection.converted_columns.contains(name) {
                "converted"
            } else if verdict.should_convert {
                "not converted"
            } else {
                "-"
            };
            println!(
                "  {:<24} confidence {:>5.2}  {}",
                truncate_str(name, 24),
                verdict.confidence,
                marker
            );
        }
        println!();
    }

    let quality = &result.data_quality;
    println!("DATA QUALITY");
    println!("{}", "-".repeat(80));
    println!(
        "  Missing values: {} ({:.2}%)",
        quality.total_missing_values, quality.missing_percentage
    );
    println!("  Duplicate rows: {}", quality.duplicate_rows);
    println!();

    println!("Use --json for machine-readable output");
    println!("Use --emit-report to save the JSON profile");
    println!("{}", "=".repeat(80));
}

/// One-line description of a column's type-specific statistics.
fn column_summary(column: &ColumnProfile) -> String {
    match &column.extension {
        Some(ColumnExtension::Numeric(stats)) => format!(
            "min {:.2}, max {:.2}, mean {:.2}",
            stats.min, stats.max, stats.mean
        ),
        Some(ColumnExtension::String(stats)) => {
            let top = stats
                .top_values
                .iter()
                .next()
                .map(|(value, count)| format!(", top '{}' x{}", truncate_str(value, 16), count))
                .unwrap_or_default();
            format!("length {}-{}{}", stats.min_length, stats.max_length, top)
        }
        Some(ColumnExtension::Temporal(stats)) => {
            format!("{} .. {}", stats.min_date, stats.max_date)
        }
        None => String::new(),
    }
}

/// Truncate a string to max length with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
