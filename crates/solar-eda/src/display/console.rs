//! Plain-text sink for terminals.
//!
//! Charts are drawn with ASCII characters: histograms as horizontal bars with
//! a `*` marking the density curve, bar charts as labelled horizontal bars.

use super::DisplaySink;
use crate::error::Result;
use crate::types::{BarChart, GroupedAggregate, HistogramPlot, SummaryTable};
use parking_lot::Mutex;
use std::io::{self, Stdout, Write};

/// Widest bar drawn, in characters.
const BAR_WIDTH: usize = 40;

/// Sink writing human-readable text to any writer.
pub struct ConsoleSink<W: Write + Send> {
    out: Mutex<W>,
}

impl ConsoleSink<Stdout> {
    /// Sink writing to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            out: Mutex::new(writer),
        }
    }

    /// Recover the writer, e.g. to inspect a buffer.
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn write_block(&self, text: &str) -> Result<()> {
        let mut out = self.out.lock();
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

impl<W: Write + Send> DisplaySink for ConsoleSink<W> {
    fn show_summary(&self, summary: &SummaryTable) -> Result<()> {
        self.write_block(&format_summary(summary))
    }

    fn render_histogram(&self, plot: &HistogramPlot) -> Result<()> {
        self.write_block(&format_histogram(plot))
    }

    fn show_ranking(&self, aggregate: &GroupedAggregate) -> Result<()> {
        self.write_block(&format_ranking(aggregate))
    }

    fn render_bar_chart(&self, chart: &BarChart) -> Result<()> {
        self.write_block(&format_bar_chart(chart))
    }

    fn notice(&self, message: &str) -> Result<()> {
        self.write_block(&format!("{}\n", message))
    }

    fn name(&self) -> &str {
        "console"
    }
}

/// Format a float with up to six decimals, keeping at least one.
pub(crate) fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return format!("{}", value);
    }
    let text = format!("{:.6}", value);
    let trimmed = text.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{}0", trimmed)
    } else {
        trimmed.to_string()
    }
}

fn format_cell(value: Option<f64>) -> String {
    value.map(|v| format!("{:.6}", v)).unwrap_or_else(|| "NaN".to_string())
}

fn format_summary(summary: &SummaryTable) -> String {
    let mut text = String::from("Summary statistics:\n");
    if summary.is_empty() {
        text.push_str("  (no numeric columns)\n\n");
        return text;
    }

    let widths: Vec<usize> = summary
        .records
        .iter()
        .map(|r| {
            r.rows()
                .iter()
                .map(|(_, v)| format_cell(*v).len())
                .chain(std::iter::once(r.column.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    text.push_str(&format!("{:<6}", ""));
    for (record, width) in summary.records.iter().zip(&widths) {
        text.push_str(&format!("  {:>width$}", record.column, width = width));
    }
    text.push('\n');

    for (row, label) in ["count", "mean", "std", "min", "25%", "50%", "75%", "max"]
        .iter()
        .enumerate()
    {
        text.push_str(&format!("{:<6}", label));
        for (record, width) in summary.records.iter().zip(&widths) {
            let cell = format_cell(record.rows()[row].1);
            text.push_str(&format!("  {:>width$}", cell, width = width));
        }
        text.push('\n');
    }
    text.push('\n');
    text
}

fn format_histogram(plot: &HistogramPlot) -> String {
    let mut text = format!("{}\n", plot.title);
    if plot.bins.is_empty() {
        text.push_str("  (no values)\n\n");
        return text;
    }

    let scale = plot.count_scale();
    let expected: Vec<Option<f64>> = plot
        .bins
        .iter()
        .map(|bin| {
            let mid = (bin.lower + bin.upper) / 2.0;
            plot.density
                .iter()
                .min_by(|a, b| (a.x - mid).abs().total_cmp(&(b.x - mid).abs()))
                .map(|p| p.density * scale)
        })
        .collect();

    let peak = plot
        .bins
        .iter()
        .map(|b| b.count as f64)
        .chain(expected.iter().flatten().copied())
        .fold(0.0f64, f64::max);

    let labels: Vec<String> = plot
        .bins
        .iter()
        .enumerate()
        .map(|(i, bin)| {
            let close = if i + 1 == plot.bins.len() { ']' } else { ')' };
            format!("[{}, {}{}", format_value(bin.lower), format_value(bin.upper), close)
        })
        .collect();
    let label_width = labels.iter().map(String::len).max().unwrap_or(0);

    for ((bin, label), curve) in plot.bins.iter().zip(&labels).zip(&expected) {
        let mut bar: Vec<char> = vec![' '; BAR_WIDTH + 1];
        let filled = scaled_len(bin.count as f64, peak);
        for slot in bar.iter_mut().take(filled) {
            *slot = '#';
        }
        if let Some(value) = curve {
            bar[scaled_len(*value, peak).min(BAR_WIDTH)] = '*';
        }
        let bar: String = bar.into_iter().collect();
        text.push_str(&format!(
            "  {:<lw$} |{} {}\n",
            label,
            bar,
            bin.count,
            lw = label_width
        ));
    }
    text.push('\n');
    text
}

fn format_ranking(aggregate: &GroupedAggregate) -> String {
    let mut text = format!("\nAverage {} per country:\n", aggregate.metric_column);
    text.push_str(&format!("{}\n", aggregate.category_column));

    let label_width = aggregate
        .groups
        .iter()
        .map(|g| g.category.len())
        .max()
        .unwrap_or(0);
    for group in &aggregate.groups {
        let value = group
            .mean
            .map(format_value)
            .unwrap_or_else(|| "NaN".to_string());
        text.push_str(&format!(
            "{:<lw$}    {}\n",
            group.category,
            value,
            lw = label_width
        ));
    }
    text.push_str(&format!(
        "Name: {}, dtype: float64\n\n",
        aggregate.metric_column
    ));
    text
}

fn format_bar_chart(chart: &BarChart) -> String {
    let mut text = format!("{}\n", chart.title);
    if chart.bars.is_empty() {
        text.push_str("  (no bars)\n\n");
        return text;
    }

    let peak = chart.bars.iter().map(|b| b.value.abs()).fold(0.0f64, f64::max);
    let label_width = chart
        .bars
        .iter()
        .map(|b| b.label.len())
        .chain(std::iter::once(chart.x_label.len()))
        .max()
        .unwrap_or(0);

    text.push_str(&format!(
        "  {:<lw$} | {}\n",
        chart.x_label,
        chart.y_label,
        lw = label_width
    ));
    for bar in &chart.bars {
        let glyph = if bar.value < 0.0 { '-' } else { '#' };
        let drawn: String = std::iter::repeat_n(glyph, scaled_len(bar.value.abs(), peak)).collect();
        text.push_str(&format!(
            "  {:<lw$} | {} {}\n",
            bar.label,
            drawn,
            format_value(bar.value),
            lw = label_width
        ));
    }
    text.push('\n');
    text
}

fn scaled_len(value: f64, peak: f64) -> usize {
    if peak <= 0.0 || !value.is_finite() {
        return 0;
    }
    ((value / peak) * BAR_WIDTH as f64).round().max(0.0) as usize
}
