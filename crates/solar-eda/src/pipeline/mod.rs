//! Pipeline orchestration: Load, Clean, Profile, Compare.

mod builder;
pub mod progress;

pub use builder::{Pipeline, PipelineBuilder, RunOutcome, RunSummary};
pub use progress::{
    AnalysisStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate,
};
