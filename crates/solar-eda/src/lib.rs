//! Exploratory Data Analysis for Solar Datasets
//!
//! A small analysis library built with Rust and Polars that takes a CSV of
//! solar measurements from raw file to summary statistics, distribution
//! plots and a cross-country ranking.
//!
//! # Overview
//!
//! The analysis runs in four stages:
//!
//! - **Loading**: Read the CSV into a [`Table`]; unreadable or empty files
//!   end the run with [`LoadOutcome::NoData`] instead of an error
//! - **Cleaning**: Forward-fill missing cells column by column
//! - **Profiling**: Descriptive statistics and a histogram with a density
//!   curve for every numeric column
//! - **Comparing**: Mean of the metric column per country, ranked and
//!   drawn as a bar chart
//!
//! Output goes through a [`DisplaySink`]: [`ConsoleSink`] prints tables and
//! text charts, [`RecordingSink`] keeps them in memory for tests and the
//! JSON report.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use solar_eda::{EdaConfig, Pipeline};
//!
//! let config = EdaConfig::builder()
//!     .input_path("data/solar_data.csv")
//!     .build()?;
//!
//! let summary = Pipeline::builder()
//!     .config(config)
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .run()?;
//!
//! if let Some(comparison) = summary.comparison {
//!     println!("Top country: {}", comparison.groups[0].category);
//! }
//! ```
//!
//! # Using the Stages Directly
//!
//! ```rust,ignore
//! use solar_eda::{DataCleaner, DataProfiler, EdaConfig, RecordingSink, load_table};
//! use solar_eda::comparator::grouped_means;
//!
//! let config = EdaConfig::default();
//! let table = load_table(&config.input_path, &config).into_table();
//! let cleaned = DataCleaner::forward_fill(&table)?;
//! let stats = DataProfiler::from_config(&config).summarize(&cleaned)?;
//! let ranking = grouped_means(&cleaned, "Country", "SolarOutput")?;
//! ```

pub mod cleaner;
pub mod comparator;
pub mod config;
pub mod display;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod profiler;
pub mod report;
pub mod table;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use cleaner::{ColumnFill, DataCleaner};
pub use comparator::{bar_chart, cross_country_summary, grouped_means};
pub use config::{BinStrategy, ConfigValidationError, EdaConfig, EdaConfigBuilder};
pub use display::{ConsoleSink, DisplayEvent, DisplaySink, RecordingSink, TeeSink};
pub use error::{EdaError, Result as EdaResult, ResultExt};
pub use loader::{LoadOutcome, NoDataReason, load_table};
pub use pipeline::{
    AnalysisStage, ClosureProgressReporter, Pipeline, PipelineBuilder, ProgressReporter,
    ProgressUpdate, RunOutcome, RunSummary,
};
pub use profiler::DataProfiler;
pub use report::{AnalysisReport, report_base_name};
pub use table::{ColumnSchema, Table, TableSchema};
pub use types::{
    Bar, BarChart, DensityPoint, GroupMean, GroupedAggregate, HistogramBin, HistogramPlot,
    SummaryRecord, SummaryTable,
};
pub use utils::{ColumnKind, column_kind, is_numeric_dtype, is_temporal_dtype};
