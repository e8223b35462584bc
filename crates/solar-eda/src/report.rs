//! JSON run report for `--json` output and `--emit-report`.

use crate::config::EdaConfig;
use crate::display::DisplayEvent;
use crate::error::Result;
use crate::pipeline::RunSummary;
use chrono::Local;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything a run produced, in one serializable document.
///
/// `events` holds the displayed tables and charts in the order they were
/// shown, so the report doubles as a plot-free rendering of the run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Crate version that produced the report
    pub version: String,
    pub config: EdaConfig,
    pub run: RunSummary,
    pub events: Vec<DisplayEvent>,
}

impl AnalysisReport {
    pub fn new(config: EdaConfig, run: RunSummary, events: Vec<DisplayEvent>) -> Self {
        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            config,
            run,
            events,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report to `<dir>/<base_name>_report.json`.
    pub fn write_to_dir(&self, dir: &Path, base_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;

        let report_path = dir.join(format!("{}_report.json", base_name));
        let mut file = File::create(&report_path)?;
        file.write_all(self.to_json()?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }
}

/// Base name for the report file, taken from the input file stem.
pub fn report_base_name(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "analysis".to_string())
}
