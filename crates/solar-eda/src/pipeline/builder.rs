//! The analysis driver and its builder.

use crate::cleaner::{ColumnFill, DataCleaner};
use crate::comparator::cross_country_summary;
use crate::config::EdaConfig;
use crate::display::{ConsoleSink, DisplaySink};
use crate::error::Result;
use crate::loader::{LoadOutcome, NoDataReason, load_table};
use crate::pipeline::progress::{
    AnalysisStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate,
};
use crate::profiler::DataProfiler;
use crate::table::Table;
use crate::types::{GroupedAggregate, SummaryTable};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    /// Nothing to analyze; the run stopped after loading.
    NoData(NoDataReason),
    /// Cleaning and profiling ran; comparison may have been skipped.
    Analyzed,
}

/// Everything a run computed.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Input file, `None` for in-memory tables
    pub input_path: Option<PathBuf>,
    pub outcome: RunOutcome,
    /// (rows, columns) of the analyzed table
    pub shape: (usize, usize),
    /// Columns that had missing cells before cleaning
    pub fills: Vec<ColumnFill>,
    pub summary: Option<SummaryTable>,
    pub comparison: Option<GroupedAggregate>,
    /// Diagnostic shown when the comparison was skipped
    pub comparison_skipped: Option<String>,
    pub duration_ms: u64,
}

impl RunSummary {
    fn no_data(input_path: Option<PathBuf>, reason: NoDataReason, start: Instant) -> Self {
        Self {
            input_path,
            outcome: RunOutcome::NoData(reason),
            shape: (0, 0),
            fills: Vec::new(),
            summary: None,
            comparison: None,
            comparison_skipped: None,
            duration_ms: start.elapsed().as_millis() as u64,
        }
    }

    pub fn has_data(&self) -> bool {
        matches!(self.outcome, RunOutcome::Analyzed)
    }
}

/// The analysis pipeline: Load, Clean, Profile, Compare.
///
/// Use [`Pipeline::builder()`] to create one.
///
/// # Example
///
/// ```rust,ignore
/// use solar_eda::{EdaConfig, Pipeline};
///
/// let summary = Pipeline::builder()
///     .config(EdaConfig::builder().input_path("data/benin.csv").build()?)
///     .on_progress(|update| println!("{}", update.message))
///     .build()?
///     .run()?;
/// ```
pub struct Pipeline {
    config: EdaConfig,
    sink: Arc<dyn DisplaySink>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
    profiler: DataProfiler,
}

static_assertions::assert_impl_all!(Pipeline: Send, Sync);

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub fn config(&self) -> &EdaConfig {
        &self.config
    }

    /// Load the configured file and analyze it.
    ///
    /// A file that yields no data ends the run with
    /// [`RunOutcome::NoData`]; that is not an error.
    pub fn run(&self) -> Result<RunSummary> {
        let start = Instant::now();
        let path = self.config.input_path.clone();

        info!("Loading dataset from: {}", path.display());
        self.report_progress(ProgressUpdate::new(
            AnalysisStage::Loading,
            format!("Loading {}", path.display()),
        ));

        match load_table(&path, &self.config) {
            LoadOutcome::NoData(reason) => {
                debug!("Stopping early: {}", reason);
                self.report_progress(ProgressUpdate::complete("No data to analyze"));
                Ok(RunSummary::no_data(Some(path), reason, start))
            }
            LoadOutcome::Loaded(table) => {
                let mut summary = self.finish(self.analyze_internal(&table, start))?;
                summary.input_path = Some(path);
                Ok(summary)
            }
        }
    }

    /// Analyze a table that is already in memory.
    ///
    /// An empty table ends the run the same way an empty file does.
    pub fn analyze(&self, table: &Table) -> Result<RunSummary> {
        let start = Instant::now();
        if table.is_empty() {
            self.report_progress(ProgressUpdate::complete("No data to analyze"));
            let reason = NoDataReason::Empty {
                path: PathBuf::new(),
            };
            return Ok(RunSummary::no_data(None, reason, start));
        }
        self.finish(self.analyze_internal(table, start))
    }

    fn finish(&self, result: Result<RunSummary>) -> Result<RunSummary> {
        match result {
            Ok(summary) => {
                self.report_progress(ProgressUpdate::complete("Analysis complete"));
                Ok(summary)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Pipeline error: {}", e);
                Err(e)
            }
        }
    }

    /// Report progress if a reporter is configured.
    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn analyze_internal(&self, table: &Table, start: Instant) -> Result<RunSummary> {
        self.report_progress(ProgressUpdate::new(
            AnalysisStage::Cleaning,
            "Forward filling missing values",
        ));
        let cleaned = DataCleaner::forward_fill(table)?;
        let fills = DataCleaner::fill_summary(table, &cleaned);

        self.report_progress(ProgressUpdate::new(
            AnalysisStage::Profiling,
            format!(
                "Profiling {} numeric columns",
                cleaned.schema().numeric_columns().count()
            ),
        ));
        let summary = self.profiler.profile(&cleaned, self.sink.as_ref())?;

        let category = self.config.category_column.as_str();
        let metric = self.config.metric_column.as_str();
        let (comparison, comparison_skipped) =
            if cleaned.has_column(category) && cleaned.has_column(metric) {
                self.report_progress(ProgressUpdate::new(
                    AnalysisStage::Comparing,
                    format!("Comparing '{}' across '{}'", metric, category),
                ));
                let aggregate =
                    cross_country_summary(&cleaned, category, metric, self.sink.as_ref())?;
                (Some(aggregate), None)
            } else {
                let message = format!("{} or {} column missing for comparison.", category, metric);
                warn!("{}", message);
                self.sink.notice(&message)?;
                (None, Some(message))
            };

        Ok(RunSummary {
            input_path: None,
            outcome: RunOutcome::Analyzed,
            shape: cleaned.shape(),
            fills,
            summary: Some(summary),
            comparison,
            comparison_skipped,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}

/// Builder for creating a [`Pipeline`] instance.
///
/// Without an explicit sink, output goes to standard output through a
/// [`ConsoleSink`].
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<EdaConfig>,
    sink: Option<Arc<dyn DisplaySink>>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(PipelineBuilder: Send);

impl PipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: EdaConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set where tables and charts are shown.
    pub fn sink(mut self, sink: Arc<dyn DisplaySink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Set a progress reporter for receiving stage updates.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a closure to receive stage updates.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the pipeline, validating the configuration.
    pub fn build(self) -> Result<Pipeline> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let sink = self
            .sink
            .unwrap_or_else(|| Arc::new(ConsoleSink::stdout()));
        debug!("Pipeline display sink: {}", sink.name());

        Ok(Pipeline {
            profiler: DataProfiler::from_config(&config),
            config,
            sink,
            progress_reporter: self.progress_reporter,
        })
    }
}
