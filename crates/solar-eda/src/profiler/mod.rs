//! Data profiling: descriptive statistics and distribution plots.
//!
//! Numeric columns are selected from the table schema, not by inspecting
//! values, so the plots follow the table's column order.

mod histogram;
mod statistics;

use crate::config::{BinStrategy, EdaConfig};
use crate::display::DisplaySink;
use crate::error::{Result, ResultExt};
use crate::table::Table;
use crate::types::{HistogramPlot, SummaryTable};
use tracing::debug;

/// Profiler for the numeric columns of a table.
#[derive(Debug, Clone, Copy)]
pub struct DataProfiler {
    bins: BinStrategy,
    grid_points: usize,
}

impl Default for DataProfiler {
    fn default() -> Self {
        Self::from_config(&EdaConfig::default())
    }
}

impl DataProfiler {
    pub fn from_config(config: &EdaConfig) -> Self {
        Self {
            bins: config.histogram_bins,
            grid_points: config.kde_grid_points,
        }
    }

    /// Descriptive statistics for every numeric column.
    pub fn summarize(&self, table: &Table) -> Result<SummaryTable> {
        let records = table
            .schema()
            .numeric_columns()
            .map(|name| {
                let values = table
                    .numeric_values(name)
                    .context(format!("Summarizing '{}'", name))?;
                Ok(statistics::describe(name, &values))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SummaryTable { records })
    }

    /// One histogram per numeric column, in column order.
    pub fn histograms(&self, table: &Table) -> Result<Vec<HistogramPlot>> {
        table
            .schema()
            .numeric_columns()
            .map(|name| {
                let values = table
                    .numeric_values(name)
                    .context(format!("Binning '{}'", name))?;
                Ok(histogram::build_histogram(
                    name,
                    &values,
                    self.bins,
                    self.grid_points,
                ))
            })
            .collect()
    }

    /// Show the statistics table and render every histogram through `sink`.
    ///
    /// Returns the statistics so callers can keep them.
    pub fn profile(&self, table: &Table, sink: &dyn DisplaySink) -> Result<SummaryTable> {
        let summary = self.summarize(table)?;
        sink.show_summary(&summary)?;

        for plot in self.histograms(table)? {
            debug!(
                "Rendering '{}' with {} bins to {}",
                plot.title,
                plot.bins.len(),
                sink.name()
            );
            sink.render_histogram(&plot)?;
        }

        Ok(summary)
    }
}
