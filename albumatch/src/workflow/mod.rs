//! Pipeline orchestration and run outcomes

pub mod pipeline;
pub mod run_report;

pub use pipeline::Pipeline;
pub use run_report::{CoverOutcome, EntryOutcome, RunReport, RunStatistics};
