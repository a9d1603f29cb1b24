//! Classify command handler.
//!
//! Implements the `classify` subcommand, which shows the super-sector each
//! sector label falls into.

use crate::pipeline::{exit_codes, write_output, OutputTarget};
use crate::summary::{normalize_label, SuperSector};
use anyhow::{Context, Result};
use serde::Serialize;

/// One classified sector label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectorClassification {
    pub label: String,
    pub normalized: String,
    pub super_sector: SuperSector,
    pub display_name: &'static str,
}

/// Classify each label in input order.
#[must_use]
pub fn classify_labels(labels: &[String]) -> Vec<SectorClassification> {
    labels
        .iter()
        .map(|label| {
            let super_sector = SuperSector::classify(label);
            SectorClassification {
                label: label.clone(),
                normalized: normalize_label(label),
                super_sector,
                display_name: super_sector.display_name(),
            }
        })
        .collect()
}

/// Run the classify command
pub fn run_classify(labels: &[String], json: bool, quiet: bool) -> Result<i32> {
    let rows = classify_labels(labels);
    let content = if json {
        serde_json::to_string_pretty(&rows).context("failed to serialize classification")?
    } else {
        let width = rows.iter().map(|r| r.label.len()).max().unwrap_or(0);
        rows.iter()
            .map(|r| {
                format!(
                    "{:<width$}  {:<10}  {}",
                    r.label,
                    r.super_sector.code(),
                    r.display_name
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    write_output(&content, &OutputTarget::Stdout, quiet)?;
    Ok(exit_codes::SUCCESS)
}
