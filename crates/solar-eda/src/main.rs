//! CLI entry point for the solar data analysis.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use solar_eda::{
    AnalysisReport, BinStrategy, ConsoleSink, DisplaySink, EdaConfig, Pipeline, RecordingSink,
    RunOutcome, TeeSink, report_base_name,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Exploratory data analysis for solar energy datasets",
    long_about = "Loads a CSV of solar measurements, forward-fills missing values, \
                  profiles every numeric column and ranks countries by their mean \
                  solar output.\n\n\
                  EXAMPLES:\n  \
                  # Analyze the default dataset (data/solar_data.csv)\n  \
                  solar-eda\n\n  \
                  # Compare countries on irradiance instead of output\n  \
                  solar-eda data/benin.csv --metric GHI\n\n  \
                  # Machine-readable run report\n  \
                  solar-eda data/benin.csv --json | jq .run.comparison"
)]
struct Args {
    /// Path to the CSV file to analyze
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Path to the CSV file to analyze (alternative to the positional argument)
    #[arg(short, long, conflicts_with = "path")]
    input: Option<PathBuf>,

    /// Column holding the country (or other category) to group by
    #[arg(long)]
    category: Option<String>,

    /// Numeric column averaged per category
    #[arg(long)]
    metric: Option<String>,

    /// Histogram bins: "auto" or a positive number
    #[arg(long, value_parser = parse_bins)]
    bins: Option<BinStrategy>,

    /// Number of points on each density curve
    #[arg(long)]
    kde_points: Option<usize>,

    /// JSON file with an analysis configuration; flags override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Only show warnings and errors in the log
    #[arg(short, long)]
    quiet: bool,

    /// Output a JSON report to stdout instead of tables and charts
    ///
    /// Disables all logs; only the final JSON report is written.
    #[arg(long)]
    json: bool,

    /// Write a JSON report to this directory as <input_name>_report.json
    #[arg(short = 'r', long, value_name = "DIR")]
    emit_report: Option<PathBuf>,
}

fn parse_bins(value: &str) -> std::result::Result<BinStrategy, String> {
    if value.eq_ignore_ascii_case("auto") {
        return Ok(BinStrategy::Auto);
    }
    match value.parse::<usize>() {
        Ok(0) | Err(_) => Err(format!(
            "expected \"auto\" or a positive number, got '{}'",
            value
        )),
        Ok(n) => Ok(BinStrategy::Fixed(n)),
    }
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled so stdout
/// only carries the JSON report.
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
        .init();
}

/// Merge the optional config file with command line overrides.
fn build_config(args: &Args) -> Result<EdaConfig> {
    let mut builder = EdaConfig::builder();

    if let Some(ref path) = args.config {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let file_config: EdaConfig = serde_json::from_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!("Loaded configuration from {}", path.display());
        builder = builder.from_config(file_config);
    }

    if let Some(path) = args.path.as_ref().or(args.input.as_ref()) {
        builder = builder.input_path(path);
    }
    if let Some(ref category) = args.category {
        builder = builder.category_column(category);
    }
    if let Some(ref metric) = args.metric {
        builder = builder.metric_column(metric);
    }
    if let Some(bins) = args.bins {
        builder = builder.histogram_bins(bins);
    }
    if let Some(points) = args.kde_points {
        builder = builder.kde_grid_points(points);
    }

    builder.build().map_err(|e| anyhow!("Invalid configuration: {}", e))
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = build_config(&args)?;

    let recorder = Arc::new(RecordingSink::new());
    let sink: Arc<dyn DisplaySink> = if args.json {
        recorder.clone()
    } else if args.emit_report.is_some() {
        Arc::new(TeeSink::new(vec![
            Arc::new(ConsoleSink::stdout()),
            recorder.clone(),
        ]))
    } else {
        Arc::new(ConsoleSink::stdout())
    };

    let pipeline = Pipeline::builder()
        .config(config.clone())
        .sink(sink)
        .on_progress(|update| {
            debug!(
                "[{:.0}%] {}: {}",
                update.progress * 100.0,
                update.stage.display_name(),
                update.message
            )
        })
        .build()?;

    let summary = pipeline.run()?;

    if let RunOutcome::NoData(ref reason) = summary.outcome {
        info!("No analysis performed: {}", reason);
    } else {
        info!("Analysis finished in {} ms", summary.duration_ms);
    }

    if args.json || args.emit_report.is_some() {
        let report = AnalysisReport::new(config.clone(), summary, recorder.take());

        if args.json {
            println!("{}", report.to_json()?);
        }

        if let Some(ref dir) = args.emit_report {
            let path = report.write_to_dir(dir, &report_base_name(Path::new(&config.input_path)))?;
            info!("Report written to {}", path.display());
        }
    }

    Ok(())
}
