//! JSON report generator.

use super::{ReportConfig, ReportFormat, ReportGenerator, ReportMetadata};
use crate::error::{IpPortError, ReportErrorKind, Result};
use crate::model::RankedEntry;
use crate::pipeline::{DataQualityIssue, EngineResults};
use crate::ranking::{RankingComparison, ScoreDistribution};
use crate::summary::SummaryTables;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// JSON report generator.
///
/// Pretty printed unless [`ReportConfig::compact`] is set;
/// [`ReportConfig::summary_only`] leaves out the per-patent rankings.
pub struct JsonReporter;

impl JsonReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    config_fingerprint: &'a str,
    record_count: usize,
    profiles: &'a [String],
    #[serde(flatten)]
    metadata: &'a ReportMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    consensus_ranking: Option<&'a [RankedEntry]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile_rankings: Option<IndexMap<&'a str, &'a [RankedEntry]>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sector_rankings: Option<BTreeMap<&'a str, &'a [RankedEntry]>>,
    summaries: &'a SummaryTables,
    comparisons: &'a [RankingComparison],
    distributions: &'a IndexMap<String, ScoreDistribution>,
    data_quality: &'a [DataQualityIssue],
}

fn head(entries: &[RankedEntry], limit: Option<usize>) -> &[RankedEntry] {
    limit.map_or(entries, |n| &entries[..n.min(entries.len())])
}

impl ReportGenerator for JsonReporter {
    fn generate_report(&self, results: &EngineResults, config: &ReportConfig) -> Result<String> {
        let tables = !config.summary_only;
        let report = JsonReport {
            generated_at: results.generated_at,
            config_fingerprint: &results.config_fingerprint,
            record_count: results.record_count,
            profiles: &results.profiles,
            metadata: &config.metadata,
            consensus_ranking: tables.then(|| head(&results.consensus_ranking, config.top)),
            profile_rankings: tables.then(|| {
                results
                    .profile_rankings
                    .iter()
                    .map(|(name, ranking)| (name.as_str(), head(ranking, config.top)))
                    .collect()
            }),
            sector_rankings: tables.then(|| {
                results
                    .sector_rankings
                    .iter()
                    .map(|(sector, ranking)| (sector.as_str(), head(ranking, config.top)))
                    .collect()
            }),
            summaries: &results.summaries,
            comparisons: &results.comparisons,
            distributions: &results.distributions,
            data_quality: &results.data_quality,
        };

        let json = if config.compact {
            serde_json::to_string(&report)
        } else {
            serde_json::to_string_pretty(&report)
        };
        json.map_err(|e| {
            IpPortError::report(
                "JSON report",
                ReportErrorKind::JsonSerializationError(e.to_string()),
            )
        })
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}
