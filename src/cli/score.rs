//! Score command handler.
//!
//! Implements the `score` subcommand: load a record set, run the engine and
//! render the results.

use crate::config::EngineConfig;
use crate::pipeline::{
    exit_codes, load_records, output_report, EngineResults, OutputTarget, ScoringEngine,
};
use crate::reports::{ReportConfig, ReportFormat, ReportMetadata};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Options for one `score` invocation.
#[derive(Debug, Clone)]
pub struct ScoreArgs {
    pub records: PathBuf,
    pub output: ReportFormat,
    pub output_file: Option<PathBuf>,
    pub top: Option<usize>,
    /// Single-line JSON
    pub compact: bool,
    /// JSON without the per-patent rankings
    pub summary_only: bool,
    /// Exit with `BELOW_THRESHOLD` when no patent reaches this consensus score
    pub min_consensus: Option<f64>,
    pub config_path: Option<PathBuf>,
    pub no_color: bool,
    pub quiet: bool,
}

/// Run the score command, returning the desired exit code.
pub fn run_score(args: ScoreArgs, config: &EngineConfig) -> Result<i32> {
    let engine = ScoringEngine::from_config(config).context("invalid scoring configuration")?;
    let records = load_records(&args.records, args.quiet)?;
    let results = engine.compute(records);

    let report_config = ReportConfig {
        top: args.top,
        compact: args.compact,
        summary_only: args.summary_only,
        metadata: ReportMetadata {
            records_path: Some(args.records.display().to_string()),
            config_path: args.config_path.as_ref().map(|p| p.display().to_string()),
        },
    };
    let target = OutputTarget::from_option(args.output_file);
    output_report(
        &results,
        args.output,
        &target,
        &report_config,
        args.no_color,
        args.quiet,
    )?;

    if let Some(threshold) = args.min_consensus {
        let passing = count_at_or_above(&results, threshold);
        if passing == 0 {
            if !args.quiet {
                eprintln!("No patent reached a consensus score of {threshold}");
            }
            return Ok(exit_codes::BELOW_THRESHOLD);
        }
        tracing::info!(passing, threshold, "consensus threshold met");
    }

    Ok(exit_codes::SUCCESS)
}

/// Number of patents whose consensus score is at least `threshold`.
#[must_use]
pub fn count_at_or_above(results: &EngineResults, threshold: f64) -> usize {
    results
        .consensus_ranking
        .iter()
        .take_while(|entry| entry.score >= threshold)
        .count()
}
