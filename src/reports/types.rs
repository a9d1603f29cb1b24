//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema)]
pub enum ReportFormat {
    /// Auto-detect: summary if TTY, JSON otherwise
    #[default]
    Auto,
    /// Full structured results
    Json,
    /// Consensus ranking and summary tables for spreadsheet import
    Csv,
    /// Brief coloured overview
    Summary,
    /// Aligned ranking table for the terminal
    Table,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Summary => write!(f, "summary"),
            Self::Table => write!(f, "table"),
        }
    }
}

/// Options shared by all reporters.
#[derive(Debug, Clone, Default)]
pub struct ReportConfig {
    /// Limit ranking rows to the best `n` (all rows when unset)
    pub top: Option<usize>,
    /// JSON only: single-line output
    pub compact: bool,
    /// JSON only: leave out the per-patent rankings
    pub summary_only: bool,
    pub metadata: ReportMetadata,
}

impl ReportConfig {
    /// Rows of a ranking to show, honouring `top` and a reporter's default.
    #[must_use]
    pub fn row_limit(&self, default: usize) -> usize {
        self.top.unwrap_or(default)
    }
}

/// Where a run's inputs came from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_path: Option<String>,
}
