//! Sink forwarding every call to several sinks.

use super::DisplaySink;
use crate::error::Result;
use crate::types::{BarChart, GroupedAggregate, HistogramPlot, SummaryTable};
use std::sync::Arc;

/// Forwards each call to all inner sinks in order, stopping at the first error.
pub struct TeeSink {
    sinks: Vec<Arc<dyn DisplaySink>>,
}

static_assertions::assert_impl_all!(TeeSink: Send, Sync);

impl TeeSink {
    pub fn new(sinks: Vec<Arc<dyn DisplaySink>>) -> Self {
        Self { sinks }
    }

    fn each(&self, f: impl Fn(&dyn DisplaySink) -> Result<()>) -> Result<()> {
        self.sinks.iter().try_for_each(|sink| f(sink.as_ref()))
    }
}

impl DisplaySink for TeeSink {
    fn show_summary(&self, summary: &SummaryTable) -> Result<()> {
        self.each(|sink| sink.show_summary(summary))
    }

    fn render_histogram(&self, plot: &HistogramPlot) -> Result<()> {
        self.each(|sink| sink.render_histogram(plot))
    }

    fn show_ranking(&self, aggregate: &GroupedAggregate) -> Result<()> {
        self.each(|sink| sink.show_ranking(aggregate))
    }

    fn render_bar_chart(&self, chart: &BarChart) -> Result<()> {
        self.each(|sink| sink.render_bar_chart(chart))
    }

    fn notice(&self, message: &str) -> Result<()> {
        self.each(|sink| sink.notice(message))
    }

    fn name(&self) -> &str {
        "tee"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{ConsoleSink, RecordingSink};

    #[test]
    fn test_forwards_to_every_sink() {
        let first = Arc::new(RecordingSink::new());
        let second = Arc::new(RecordingSink::new());
        let tee = TeeSink::new(vec![first.clone(), second.clone()]);

        tee.notice("Data loaded").unwrap();
        tee.show_summary(&SummaryTable::default()).unwrap();

        assert_eq!(first.events(), second.events());
        assert_eq!(first.events().len(), 2);
    }

    #[test]
    fn test_mixed_sinks() {
        let recorder = Arc::new(RecordingSink::new());
        let tee = TeeSink::new(vec![
            Arc::new(ConsoleSink::new(Vec::<u8>::new())),
            recorder.clone(),
        ]);

        tee.notice("Country or SolarOutput column missing for comparison.")
            .unwrap();

        assert_eq!(recorder.notices().len(), 1);
    }
}
