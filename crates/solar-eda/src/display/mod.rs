//! Display sinks for analysis output.
//!
//! The analysis stages never print directly: tables, rankings and charts go
//! to a [`DisplaySink`]. This keeps the stages testable without a terminal or
//! a graphical backend.
//!
//! # Implementing a New Sink
//!
//! 1. Create a new file in `src/display/` (e.g. `svg.rs`)
//! 2. Implement [`DisplaySink`] for your sink struct
//! 3. Export the sink from this module
//!
//! # Example
//!
//! ```rust,ignore
//! use solar_eda::display::{ConsoleSink, RecordingSink};
//! use std::sync::Arc;
//!
//! let pipeline = Pipeline::builder()
//!     .sink(Arc::new(ConsoleSink::stdout()))
//!     .build()?;
//! ```

mod console;
mod recording;
mod tee;

pub use console::ConsoleSink;
pub use recording::{DisplayEvent, RecordingSink};
pub use tee::TeeSink;

use crate::error::Result;
use crate::types::{BarChart, GroupedAggregate, HistogramPlot, SummaryTable};

/// Receiver for everything the analysis shows to the user.
///
/// Implementations must be `Send + Sync` so a configured pipeline can be
/// moved to another thread. Calls arrive in pipeline order and each returns
/// once the output has been shown or queued.
pub trait DisplaySink: Send + Sync {
    /// Show the descriptive statistics table.
    fn show_summary(&self, summary: &SummaryTable) -> Result<()>;

    /// Render one distribution plot.
    fn render_histogram(&self, plot: &HistogramPlot) -> Result<()>;

    /// Show the ranked per-category means.
    fn show_ranking(&self, aggregate: &GroupedAggregate) -> Result<()>;

    /// Render a bar chart.
    fn render_bar_chart(&self, chart: &BarChart) -> Result<()>;

    /// Show a human-readable diagnostic.
    fn notice(&self, message: &str) -> Result<()>;

    /// Sink name for logging.
    fn name(&self) -> &str;
}
