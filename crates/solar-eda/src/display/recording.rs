//! In-memory sink that records every display call.

use super::DisplaySink;
use crate::error::Result;
use crate::types::{BarChart, GroupedAggregate, HistogramPlot, SummaryTable};
use parking_lot::Mutex;
use serde::Serialize;

/// A single recorded display call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum DisplayEvent {
    Summary(SummaryTable),
    Histogram(HistogramPlot),
    Ranking(GroupedAggregate),
    BarChart(BarChart),
    Notice(String),
}

/// Sink that keeps display calls in memory.
///
/// Used by the JSON output mode and by tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<DisplayEvent>>,
}

static_assertions::assert_impl_all!(RecordingSink: Send, Sync);

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events in call order.
    pub fn events(&self) -> Vec<DisplayEvent> {
        self.events.lock().clone()
    }

    pub fn histograms(&self) -> Vec<HistogramPlot> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                DisplayEvent::Histogram(plot) => Some(plot.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn bar_charts(&self) -> Vec<BarChart> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                DisplayEvent::BarChart(chart) => Some(chart.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn notices(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                DisplayEvent::Notice(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    /// Remove and return all recorded events.
    pub fn take(&self) -> Vec<DisplayEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    fn push(&self, event: DisplayEvent) -> Result<()> {
        self.events.lock().push(event);
        Ok(())
    }
}

impl DisplaySink for RecordingSink {
    fn show_summary(&self, summary: &SummaryTable) -> Result<()> {
        self.push(DisplayEvent::Summary(summary.clone()))
    }

    fn render_histogram(&self, plot: &HistogramPlot) -> Result<()> {
        self.push(DisplayEvent::Histogram(plot.clone()))
    }

    fn show_ranking(&self, aggregate: &GroupedAggregate) -> Result<()> {
        self.push(DisplayEvent::Ranking(aggregate.clone()))
    }

    fn render_bar_chart(&self, chart: &BarChart) -> Result<()> {
        self.push(DisplayEvent::BarChart(chart.clone()))
    }

    fn notice(&self, message: &str) -> Result<()> {
        self.push(DisplayEvent::Notice(message.to_string()))
    }

    fn name(&self) -> &str {
        "recording"
    }
}
