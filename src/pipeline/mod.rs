//! Pipeline orchestration: load → sanitize → score → rank → summarize → report.

mod engine;
mod load;
mod output;
mod report_stage;
mod sanitize;

pub use engine::{compute, EngineResults, ScoringEngine, CONSENSUS};
pub use load::{load_records, parse_records};
pub use output::{auto_detect_format, should_use_color, write_output, OutputTarget};
pub use report_stage::output_report;
pub use sanitize::{sanitize, DataQualityIssue, IssueAction, SanitizedRecords};

/// Exit codes for scripted use
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// No patent reached the requested `--min-consensus` score
    pub const BELOW_THRESHOLD: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
