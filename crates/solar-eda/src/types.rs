//! Result types shared between the analysis stages, the display sinks and
//! the JSON report.

use serde::{Deserialize, Serialize};

// =============================================================================
// Profiling
// =============================================================================

/// Descriptive statistics for one numeric column.
///
/// Every field except `count` is `None` when the column has no values;
/// `std` is also `None` for a single value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub column: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

impl SummaryRecord {
    /// Statistic rows in display order, paired with their labels.
    pub fn rows(&self) -> [(&'static str, Option<f64>); 8] {
        [
            ("count", Some(self.count as f64)),
            ("mean", self.mean),
            ("std", self.std),
            ("min", self.min),
            ("25%", self.q25),
            ("50%", self.median),
            ("75%", self.q75),
            ("max", self.max),
        ]
    }
}

/// Statistics for all numeric columns of a table, in column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryTable {
    pub records: Vec<SummaryRecord>,
}

impl SummaryTable {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, column: &str) -> Option<&SummaryRecord> {
        self.records.iter().find(|r| r.column == column)
    }
}

/// One histogram bin. The last bin of a histogram includes its upper edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Point of a density curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityPoint {
    pub x: f64,
    pub density: f64,
}

/// Histogram of a numeric column with an optional density overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramPlot {
    pub column: String,
    pub title: String,
    pub bins: Vec<HistogramBin>,
    /// Empty when fewer than two distinct values exist
    pub density: Vec<DensityPoint>,
}

impl HistogramPlot {
    /// Number of values counted in the bins.
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// Factor converting a density value to the count scale of the bins.
    pub fn count_scale(&self) -> f64 {
        match self.bins.first() {
            Some(bin) => self.total() as f64 * (bin.upper - bin.lower),
            None => 0.0,
        }
    }
}

// =============================================================================
// Comparison
// =============================================================================

/// Mean of the metric for one category value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMean {
    pub category: String,
    /// `None` when no row of the group has a metric value
    pub mean: Option<f64>,
}

/// Per-category means ranked by descending mean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedAggregate {
    pub category_column: String,
    pub metric_column: String,
    pub groups: Vec<GroupMean>,
}

impl GroupedAggregate {
    /// Groups that have a mean, as (label, value) pairs in rank order.
    pub fn ranked_values(&self) -> Vec<(&str, f64)> {
        self.groups
            .iter()
            .filter_map(|g| g.mean.map(|m| (g.category.as_str(), m)))
            .collect()
    }
}

/// Single bar of a bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

/// Bar chart with axis labels, bars drawn in the given order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
}
