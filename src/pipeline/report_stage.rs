//! Report output stage.

use super::engine::EngineResults;
use super::{auto_detect_format, should_use_color, write_output, OutputTarget};
use crate::reports::{create_reporter_with_options, ReportConfig, ReportFormat};
use anyhow::Result;

/// Render `results` in the requested format and write them out.
pub fn output_report(
    results: &EngineResults,
    format: ReportFormat,
    target: &OutputTarget,
    report_config: &ReportConfig,
    no_color: bool,
    quiet: bool,
) -> Result<()> {
    let effective = auto_detect_format(format, target);
    let use_color = should_use_color(no_color) && target.is_terminal();
    let reporter = create_reporter_with_options(effective, use_color);
    tracing::debug!(format = %effective, "rendering report");

    let report = reporter.generate_report(results, report_config)?;
    write_output(&report, target, quiet)
}
